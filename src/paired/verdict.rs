// Paired verdict assessment
//
// Ties the tally and the signed-rank test together for the two score
// columns and turns the p-values into a verdict:
// - p_greater < alpha: first column significantly better
// - else p_less < alpha: second column significantly better
// - else: no significant difference
//
// All-zero differences leave the test undefined; that is reported as
// "not applicable" instead of failing the run.

use crate::config::AnalysisConfig;
use crate::paired::tally::{score_deltas, OutcomeTally};
use crate::paired::wilcoxon::{signed_rank_test, SignedRankTest};
use crate::stats::ColumnSummary;
use serde::{Deserialize, Serialize};

/// Which side (if any) is significantly better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    FirstBetter,
    SecondBetter,
    NoSignificantDifference,
}

impl Verdict {
    /// Apply the one-sided decision rule at significance level `alpha`
    pub fn decide(test: &SignedRankTest, alpha: f64) -> Self {
        if test.p_greater < alpha {
            Verdict::FirstBetter
        } else if test.p_less < alpha {
            Verdict::SecondBetter
        } else {
            Verdict::NoSignificantDifference
        }
    }
}

/// Outcome of the significance test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    /// Test ran and produced a verdict
    Completed {
        test: SignedRankTest,
        verdict: Verdict,
    },

    /// Test is undefined for this input (e.g. every difference is zero)
    NotApplicable { reason: String },
}

/// Paired comparison of the first two score columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedAssessment {
    pub first: String,
    pub second: String,
    pub tally: OutcomeTally,
    /// Descriptive statistics of `first - second`
    pub delta_summary: Option<ColumnSummary>,
    pub outcome: TestOutcome,
    pub significance_level: f64,
}

impl PairedAssessment {
    /// Verdict if the test completed
    pub fn verdict(&self) -> Option<Verdict> {
        match &self.outcome {
            TestOutcome::Completed { verdict, .. } => Some(*verdict),
            TestOutcome::NotApplicable { .. } => None,
        }
    }

    /// One-line human-readable verdict
    pub fn verdict_line(&self) -> String {
        let alpha = self.significance_level;
        match &self.outcome {
            TestOutcome::Completed { verdict, .. } => match verdict {
                Verdict::FirstBetter => format!(
                    "{} is significantly better than {} (p < {})",
                    self.first, self.second, alpha
                ),
                Verdict::SecondBetter => format!(
                    "{} is significantly better than {} (p < {})",
                    self.second, self.first, alpha
                ),
                Verdict::NoSignificantDifference => format!(
                    "No significant difference between {} and {}",
                    self.first, self.second
                ),
            },
            TestOutcome::NotApplicable { reason } => format!(
                "Test not applicable for {} vs {}: {}",
                self.first, self.second, reason
            ),
        }
    }
}

/// Tally wins and run the one-sided signed-rank test for two columns
///
/// # Example
/// ```
/// use selfplay_analyze::config::AnalysisConfig;
/// use selfplay_analyze::paired::{assess_pair, Verdict};
///
/// let a = vec![10.0, 10.0, 10.0];
/// let b = vec![5.0, 5.0, 5.0];
/// let assessment = assess_pair("A", &a, "B", &b, &AnalysisConfig::default());
/// assert_eq!(assessment.tally.first_wins, 3);
/// // Three games are too few for significance
/// assert_eq!(assessment.verdict(), Some(Verdict::NoSignificantDifference));
/// ```
pub fn assess_pair(
    first_name: &str,
    first_scores: &[f64],
    second_name: &str,
    second_scores: &[f64],
    config: &AnalysisConfig,
) -> PairedAssessment {
    let deltas = score_deltas(first_scores, second_scores);
    let tally = OutcomeTally::from_deltas(&deltas);
    let delta_summary = ColumnSummary::from_values("Delta", &deltas);

    let outcome = match signed_rank_test(&deltas, config.exact_max_rows) {
        Ok(test) => {
            let verdict = Verdict::decide(&test, config.significance_level);
            TestOutcome::Completed { test, verdict }
        }
        Err(e) => {
            tracing::debug!("Signed-rank test not applicable: {}", e);
            TestOutcome::NotApplicable {
                reason: e.to_string(),
            }
        }
    };

    PairedAssessment {
        first: first_name.to_string(),
        second: second_name.to_string(),
        tally,
        delta_summary,
        outcome,
        significance_level: config.significance_level,
    }
}
