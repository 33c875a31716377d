//! Descriptive statistics for score columns
//!
//! count, mean, sample standard deviation, min, quartiles and max for every
//! column of a [`ResultTable`], in input column order.

use crate::table::ResultTable;
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (N-1); `None` with fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64, // P50
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarize a non-empty slice of values
    ///
    /// Returns `None` for an empty slice.
    pub fn from_values(name: &str, values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let n = values.len();

        // Shifted by the first value so constant columns come out exact
        let shifted_sum: f64 = values.iter().map(|v| v - first).sum();
        let mean = first + shifted_sum / n as f64;

        let std = if n > 1 {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sum_sq / (n - 1) as f64).sqrt())
        } else {
            None
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            name: name.to_string(),
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: calculate_percentile(&sorted, 25.0),
            median: calculate_percentile(&sorted, 50.0),
            p75: calculate_percentile(&sorted, 75.0),
            max: sorted[n - 1],
        })
    }
}

/// Summarize every column of the table, preserving column order
pub fn summarize(table: &ResultTable) -> Vec<ColumnSummary> {
    table
        .columns()
        .filter_map(|(name, values)| ColumnSummary::from_values(name, values))
        .collect()
}

/// Calculate percentile from sorted data (linear interpolation)
pub fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}
