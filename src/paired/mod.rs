// Paired analysis of two agents' scores
//
// Row-wise score differences drive both the win/tie tally and a one-sided
// Wilcoxon signed-rank test (Pratt zero handling). The reverse-direction
// p-value is the complement of the forward one, so a single rank statistic
// decides which side, if any, is significantly better.
//
// Scientific Foundation:
// [1] Wilcoxon, F. (1945). Individual comparisons by ranking methods.
//     Biometrics Bulletin 1(6).
// [2] Pratt, J. W. (1959). Remarks on zeros and ties in the Wilcoxon signed
//     rank procedures. JASA 54(287).
// [3] Cureton, E. E. (1967). The normal approximation to the signed-rank
//     sampling distribution when zero differences are present. JASA 62(319).

mod tally;
mod verdict;
mod wilcoxon;

pub use tally::{format_rate, score_deltas, OutcomeTally};
pub use verdict::{assess_pair, PairedAssessment, TestOutcome, Verdict};
pub use wilcoxon::{
    average_ranks, signed_rank_test, RankMethod, SignedRankTest, MAX_EXACT_ROWS,
};
