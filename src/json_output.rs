//! JSON output format for analysis reports
//!
//! `--format json`: the same content as the text report, for scripts that
//! aggregate many self-play runs.

use crate::analysis::{AnalysisReport, PairedSection};
use crate::config::Verbosity;
use crate::paired::{SignedRankTest, TestOutcome, Verdict};
use crate::report::SKIP_NOTICE;
use crate::stats::ColumnSummary;
use serde::{Deserialize, Serialize};

/// Win counts and rates for the paired columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWinCounts {
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
    /// Fractions in [0, 1]
    pub first_win_rate: f64,
    pub second_win_rate: f64,
    pub tie_rate: f64,
}

/// Signed-rank test section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSignificance {
    /// Human-readable verdict line, identical to the text report
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<SignedRankTest>,
    pub significance_level: f64,
}

/// Paired analysis of the first two columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPairedAnalysis {
    pub first: String,
    pub second: String,
    pub wins: JsonWinCounts,
    /// Only with `--verbose`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_summary: Option<ColumnSummary>,
    pub significance: JsonSignificance,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub summaries: Vec<ColumnSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired: Option<JsonPairedAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl JsonReport {
    /// Convert an analysis report into its JSON shape
    pub fn from_report(report: &AnalysisReport) -> Self {
        let (paired, skipped) = match &report.paired {
            PairedSection::Skipped { .. } => (None, Some(SKIP_NOTICE.to_string())),
            PairedSection::Analyzed(assessment) => {
                let tally = &assessment.tally;
                let test = match &assessment.outcome {
                    TestOutcome::Completed { test, .. } => Some(test.clone()),
                    TestOutcome::NotApplicable { .. } => None,
                };
                let delta_summary = match report.config.verbosity {
                    Verbosity::Detailed => assessment.delta_summary.clone(),
                    Verbosity::Summary => None,
                };

                let paired = JsonPairedAnalysis {
                    first: assessment.first.clone(),
                    second: assessment.second.clone(),
                    wins: JsonWinCounts {
                        first_wins: tally.first_wins,
                        second_wins: tally.second_wins,
                        ties: tally.ties,
                        first_win_rate: tally.first_win_rate(),
                        second_win_rate: tally.second_win_rate(),
                        tie_rate: tally.tie_rate(),
                    },
                    delta_summary,
                    significance: JsonSignificance {
                        summary: assessment.verdict_line(),
                        verdict: assessment.verdict(),
                        test,
                        significance_level: assessment.significance_level,
                    },
                };
                (Some(paired), None)
            }
        };

        Self {
            summaries: report.summaries.clone(),
            paired,
            skipped,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
