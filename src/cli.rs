//! CLI argument parsing for selfplay-analyze

use clap::{Parser, ValueEnum};

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable Markdown tables (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "selfplay-analyze")]
#[command(version)]
#[command(about = "Analyze two-player self-play score tables", long_about = None)]
pub struct Cli {
    /// CSV file with a header row and one score column per agent ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also show score-difference statistics and signed-rank test details
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
