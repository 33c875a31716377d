// One-sided Wilcoxon signed-rank test with Pratt zero handling
//
// Alternative hypothesis: the first column is stochastically greater than
// the second, i.e. the paired differences are shifted above zero.
//
// Pratt (1959): zero differences take part in ranking |d| and are then
// dropped from the rank sums. The normal approximation is adjusted for the
// removed zero ranks (Cureton 1967) and for tied ranks.
//
// Method selection matches the usual "auto" rule: the exact null
// distribution for small samples without zeros, the normal approximation
// otherwise.

use crate::error::DegenerateInputError;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Samples smaller than this make the normal approximation unreliable
const NORMAL_APPROX_MIN_ROWS: usize = 10;

/// Subset counts for the exact distribution are held in u64
pub const MAX_EXACT_ROWS: usize = 63;

/// How the p-value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMethod {
    /// Exact enumeration of the signed-rank null distribution
    Exact,
    /// Normal approximation with zero and tie corrections
    Normal,
}

impl std::fmt::Display for RankMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankMethod::Exact => write!(f, "exact"),
            RankMethod::Normal => write!(f, "normal approximation"),
        }
    }
}

/// Result of the one-sided signed-rank test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRankTest {
    /// R+: sum of ranks of positive differences
    pub statistic: f64,

    /// p-value for "first > second"
    pub p_greater: f64,

    /// p-value for "first < second", defined as `1 - p_greater`
    pub p_less: f64,

    pub method: RankMethod,

    /// Standardized statistic (normal approximation only)
    pub z_score: Option<f64>,

    /// Number of paired rows, zeros included
    pub n: usize,

    /// Number of rows with a zero difference
    pub n_zero: usize,
}

/// Run the one-sided signed-rank test on paired differences
///
/// `exact_max_rows` is the largest sample for which the exact distribution is
/// used; values above [`MAX_EXACT_ROWS`] are capped.
///
/// # Example
/// ```
/// use selfplay_analyze::paired::signed_rank_test;
///
/// let test = signed_rank_test(&[5.0, 5.0, 5.0], 50).unwrap();
/// assert_eq!(test.p_greater, 0.125); // 1 of 8 sign patterns reaches R+ = 6
/// ```
pub fn signed_rank_test(
    deltas: &[f64],
    exact_max_rows: usize,
) -> Result<SignedRankTest, DegenerateInputError> {
    if deltas.is_empty() {
        return Err(DegenerateInputError::Empty);
    }

    let n = deltas.len();
    let n_zero = deltas.iter().filter(|&&d| d == 0.0).count();
    if n_zero == n {
        return Err(DegenerateInputError::AllZero);
    }

    let abs: Vec<f64> = deltas.iter().map(|d| d.abs()).collect();
    let ranks = average_ranks(&abs);

    let statistic: f64 = ranks
        .iter()
        .zip(deltas)
        .filter(|(_, &d)| d > 0.0)
        .map(|(r, _)| r)
        .sum();

    let use_exact = n <= exact_max_rows.min(MAX_EXACT_ROWS) && n_zero == 0;
    let (method, p_greater, z_score) = if use_exact {
        (RankMethod::Exact, exact_upper_tail(n, statistic), None)
    } else {
        if n < NORMAL_APPROX_MIN_ROWS {
            tracing::warn!(
                "Signed-rank normal approximation with only {} rows; p-value may be inaccurate",
                n
            );
        }
        let nonzero_ranks: Vec<f64> = ranks
            .iter()
            .zip(deltas)
            .filter(|(_, &d)| d != 0.0)
            .map(|(&r, _)| r)
            .collect();
        let z = normal_z_score(n, n_zero, &nonzero_ranks, statistic);
        (RankMethod::Normal, normal_sf(z), Some(z))
    };

    tracing::debug!(
        "Signed-rank test: n={}, zeros={}, R+={}, method={}, p_greater={}",
        n,
        n_zero,
        statistic,
        method,
        p_greater
    );

    Ok(SignedRankTest {
        statistic,
        p_greater,
        p_less: 1.0 - p_greater,
        method,
        z_score,
        n,
        n_zero,
    })
}

/// Average (mid) ranks, 1-based; equal values share the mean of their ranks
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        // Positions start..=end hold ranks start+1..=end+1
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

/// P(R+ >= floor(statistic)) under the exact null distribution for `n` ranks
fn exact_upper_tail(n: usize, statistic: f64) -> f64 {
    let counts = signed_rank_counts(n);
    // Mid-ranks can make R+ a half-integer; truncation keeps the tail conservative
    let threshold = (statistic.floor().max(0.0) as usize).min(counts.len());
    let tail: u64 = counts[threshold..].iter().sum();
    tail as f64 / (1u64 << n) as f64
}

/// Number of sign assignments of ranks 1..=n with each possible R+
fn signed_rank_counts(n: usize) -> Vec<u64> {
    let max_sum = n * (n + 1) / 2;
    let mut counts = vec![0u64; max_sum + 1];
    counts[0] = 1;
    for rank in 1..=n {
        for sum in (rank..=max_sum).rev() {
            counts[sum] += counts[sum - rank];
        }
    }
    counts
}

/// Standardize R+ with Pratt's zero adjustment and the tie correction
fn normal_z_score(n: usize, n_zero: usize, nonzero_ranks: &[f64], statistic: f64) -> f64 {
    let n = n as f64;
    let z = n_zero as f64;

    let mean = n * (n + 1.0) * 0.25 - z * (z + 1.0) * 0.25;
    let mut variance24 = n * (n + 1.0) * (2.0 * n + 1.0) - z * (z + 1.0) * (2.0 * z + 1.0);

    let mut sorted = nonzero_ranks.to_vec();
    sorted.sort_by(f64::total_cmp);
    for group in sorted.chunk_by(|a, b| a == b) {
        let t = group.len() as f64;
        if t > 1.0 {
            variance24 -= 0.5 * t * (t * t - 1.0);
        }
    }

    let se = (variance24 / 24.0).sqrt();
    (statistic - mean) / se
}

/// Upper tail of the standard normal distribution
fn normal_sf(z: f64) -> f64 {
    0.5 * libm::erfc(z / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_average_ranks_with_ties() {
        let ranks = average_ranks(&[3.0, 1.0, 2.0, 2.0, 4.0, 1.0, 3.0, 5.0]);
        assert_eq!(ranks, vec![5.5, 1.5, 3.5, 3.5, 7.0, 1.5, 5.5, 8.0]);
    }

    #[test]
    fn test_average_ranks_all_equal() {
        assert_eq!(average_ranks(&[5.0, 5.0, 5.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_signed_rank_counts_small() {
        // n=3: sums 0..=6 with counts 1,1,1,2,1,1,1
        assert_eq!(signed_rank_counts(3), vec![1, 1, 1, 2, 1, 1, 1]);
        assert_eq!(signed_rank_counts(10).iter().sum::<u64>(), 1024);
    }

    #[test]
    fn test_three_identical_wins_not_significant() {
        let test = signed_rank_test(&[5.0, 5.0, 5.0], 50).unwrap();
        assert_eq!(test.method, RankMethod::Exact);
        assert_eq!(test.statistic, 6.0);
        assert_eq!(test.p_greater, 0.125);
        assert_eq!(test.p_less, 0.875);
        assert_eq!(test.z_score, None);
    }

    #[test]
    fn test_ten_positive_deltas_exact() {
        let deltas: Vec<f64> = (1..=10).map(f64::from).collect();
        let test = signed_rank_test(&deltas, 50).unwrap();
        assert_eq!(test.statistic, 55.0);
        assert_eq!(test.p_greater, 1.0 / 1024.0);
    }

    #[test]
    fn test_all_negative_deltas() {
        let test = signed_rank_test(&[-5.0; 10], 50).unwrap();
        assert_eq!(test.statistic, 0.0);
        assert_eq!(test.p_greater, 1.0);
        assert_eq!(test.p_less, 0.0);
    }

    #[test]
    fn test_exact_with_tied_ranks() {
        let test = signed_rank_test(&[3.0, -1.0, 2.0, -2.0, 4.0, 1.0, -3.0, 5.0], 50).unwrap();
        assert_eq!(test.statistic, 25.5);
        assert_eq!(test.method, RankMethod::Exact);
        assert_eq!(test.p_greater, 0.19140625);
    }

    #[test]
    fn test_zero_delta_forces_normal_approximation() {
        let deltas: Vec<f64> = (0..10).map(f64::from).collect();
        let test = signed_rank_test(&deltas, 50).unwrap();
        assert_eq!(test.method, RankMethod::Normal);
        assert_eq!(test.n_zero, 1);
        assert_eq!(test.statistic, 54.0);
        assert_close(test.z_score.unwrap(), 2.7556759606310757);
        assert_close(test.p_greater, 0.002928549542642068);
    }

    #[test]
    fn test_normal_with_zeros_and_ties() {
        let test =
            signed_rank_test(&[3.0, -1.0, 2.0, -2.0, 4.0, 1.0, -3.0, 5.0, 0.0], 50).unwrap();
        assert_eq!(test.method, RankMethod::Normal);
        assert_eq!(test.statistic, 30.5);
        assert_close(test.z_score.unwrap(), 1.0114389994248403);
        assert_close(test.p_greater, 0.15590318162868888);
    }

    #[test]
    fn test_large_sample_uses_normal() {
        let test = signed_rank_test(&[1.0; 60], 50).unwrap();
        assert_eq!(test.method, RankMethod::Normal);
        assert_eq!(test.statistic, 1830.0);
        assert_close(test.z_score.unwrap(), 7.745966692414834);
        assert!(test.p_greater < 1e-14);
    }

    #[test]
    fn test_exact_threshold_is_configurable() {
        let deltas: Vec<f64> = (1..=10).map(f64::from).collect();
        let test = signed_rank_test(&deltas, 5).unwrap();
        assert_eq!(test.method, RankMethod::Normal);
    }

    #[test]
    fn test_default_exact_cutoff_is_inclusive() {
        let max_rows = AnalysisConfig::default().exact_max_rows;
        assert_eq!(max_rows, 50);

        let at_cutoff: Vec<f64> = (1..=max_rows).map(|d| d as f64).collect();
        let test = signed_rank_test(&at_cutoff, max_rows).unwrap();
        assert_eq!(test.method, RankMethod::Exact);
        assert_eq!(test.z_score, None);
        assert_eq!(test.p_greater, 0.5f64.powi(50));

        let past_cutoff: Vec<f64> = (1..=max_rows + 1).map(|d| d as f64).collect();
        let test = signed_rank_test(&past_cutoff, max_rows).unwrap();
        assert_eq!(test.method, RankMethod::Normal);
        assert!(test.z_score.is_some());
    }

    #[test]
    fn test_p_values_are_complements() {
        let test = signed_rank_test(&[2.0, 0.0, 0.0, -1.0, 3.0], 50).unwrap();
        assert_eq!(test.p_greater + test.p_less, 1.0);
        assert_close(test.p_greater, 0.19807195457603705);
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        assert_eq!(
            signed_rank_test(&[0.0, 0.0, 0.0], 50).unwrap_err(),
            DegenerateInputError::AllZero
        );
    }

    #[test]
    fn test_empty_is_degenerate() {
        assert_eq!(
            signed_rank_test(&[], 50).unwrap_err(),
            DegenerateInputError::Empty
        );
    }
}
