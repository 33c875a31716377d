// Win/tie tally for two paired score columns
//
// Equal scores are always counted as ties. The game breaks ties on fewest
// purchased cards, which the score table does not record.

use serde::{Deserialize, Serialize};

/// Row-wise score differences: `col1[i] - col2[i]`
pub fn score_deltas(col1: &[f64], col2: &[f64]) -> Vec<f64> {
    debug_assert_eq!(col1.len(), col2.len());
    col1.iter().zip(col2).map(|(a, b)| a - b).collect()
}

/// Win counts for both sides plus ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeTally {
    /// Rows where the first column scored higher
    pub first_wins: usize,
    /// Rows where the second column scored higher
    pub second_wins: usize,
    /// Rows with equal scores
    pub ties: usize,
}

impl OutcomeTally {
    /// Classify each delta as a win, a loss, or a tie
    pub fn from_deltas(deltas: &[f64]) -> Self {
        let mut tally = Self::default();
        for &delta in deltas {
            if delta > 0.0 {
                tally.first_wins += 1;
            } else if delta < 0.0 {
                tally.second_wins += 1;
            } else {
                tally.ties += 1;
            }
        }
        tally
    }

    /// Total number of games tallied
    pub fn total(&self) -> usize {
        self.first_wins + self.second_wins + self.ties
    }

    pub fn first_win_rate(&self) -> f64 {
        self.rate(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.rate(self.second_wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    fn rate(&self, count: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }
}

/// Format a rate in [0, 1] as a percentage with two decimals
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
