// Configuration for the self-play analysis pipeline
//
// The significance level is fixed at the conventional 0.05 for every report
// the CLI produces; it lives here so library callers and tests can vary it.

use crate::paired::MAX_EXACT_ROWS;
use serde::{Deserialize, Serialize};

/// How much the report shows beyond the core sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Descriptive statistics, win counts, verdict and both p-values
    #[default]
    Summary,
    /// Summary plus a Delta row and the rank-test internals
    Detailed,
}

/// Configuration for paired analysis
///
/// # Example
/// ```
/// use selfplay_analyze::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Statistical significance level (alpha) for the one-sided rank test
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: stricter, fewer false "significantly better" verdicts
    pub significance_level: f64,

    /// Largest row count for which the exact signed-rank distribution is used
    ///
    /// Above this (or whenever a score difference is zero) the normal
    /// approximation is used instead.
    ///
    /// Default: 50
    pub exact_max_rows: usize,

    /// Report verbosity
    pub verbosity: Verbosity,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            exact_max_rows: 50,
            verbosity: Verbosity::Summary,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration with the detailed report enabled
    pub fn detailed() -> Self {
        Self {
            verbosity: Verbosity::Detailed,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.exact_max_rows > MAX_EXACT_ROWS {
            return Err(format!(
                "exact_max_rows must be <= {}, got {}",
                MAX_EXACT_ROWS, self.exact_max_rows
            ));
        }

        Ok(())
    }
}
