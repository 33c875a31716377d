use anyhow::Result;
use clap::Parser;
use selfplay_analyze::{
    analysis,
    cli::{Cli, OutputFormat},
    config::{AnalysisConfig, Verbosity},
    json_output::JsonReport,
    table::InputSource,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = AnalysisConfig {
        verbosity: if args.verbose {
            Verbosity::Detailed
        } else {
            Verbosity::Summary
        },
        ..AnalysisConfig::default()
    };

    // Load and analyze fully before printing anything
    let source = InputSource::from_arg(args.input.as_deref());
    let report = analysis::run(&source, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", JsonReport::from_report(&report).to_json()?),
    }

    Ok(())
}
