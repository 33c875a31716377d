//! The analysis pipeline: load → summarize → tally → test
//!
//! [`analyze`] is a pure function of the table and configuration; rendering
//! lives in [`crate::report`] and [`crate::json_output`].

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::paired::{assess_pair, PairedAssessment};
use crate::stats::{summarize, ColumnSummary};
use crate::table::{load_table, InputSource, ResultTable};
use serde::{Deserialize, Serialize};

/// Paired analysis result, or why it was skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairedSection {
    /// Exactly two score columns were compared
    Analyzed(PairedAssessment),
    /// More than two players: only descriptive statistics apply
    Skipped { players: usize },
}

/// Everything the report shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Descriptive statistics per column, in input order
    pub summaries: Vec<ColumnSummary>,
    pub paired: PairedSection,
    pub config: AnalysisConfig,
}

/// Analyze a loaded score table
///
/// # Example
/// ```
/// use selfplay_analyze::analysis::{analyze, PairedSection};
/// use selfplay_analyze::config::AnalysisConfig;
/// use selfplay_analyze::table::read_table;
///
/// let table = read_table("A,B,C\n1,2,3\n".as_bytes(), "inline").unwrap();
/// let report = analyze(&table, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.summaries.len(), 3);
/// assert_eq!(report.paired, PairedSection::Skipped { players: 3 });
/// ```
pub fn analyze(table: &ResultTable, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate().map_err(AnalysisError::Config)?;

    let summaries = summarize(table);

    let paired = if table.n_columns() > 2 {
        tracing::debug!(
            "Skipping paired analysis: {} players in table",
            table.n_columns()
        );
        PairedSection::Skipped {
            players: table.n_columns(),
        }
    } else {
        let names = table.column_names();
        PairedSection::Analyzed(assess_pair(
            &names[0],
            table.column(0),
            &names[1],
            table.column(1),
            config,
        ))
    };

    Ok(AnalysisReport {
        summaries,
        paired,
        config: config.clone(),
    })
}

/// Load a table from `source` and analyze it
pub fn run(source: &InputSource, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let table = load_table(source)?;
    analyze(&table, config)
}
