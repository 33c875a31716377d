//! selfplay-analyze - Statistical summary of two-player self-play results
//!
//! Loads a CSV table of per-game scores (one column per agent), computes
//! descriptive statistics, tallies wins and ties for the first two columns,
//! and runs a one-sided Wilcoxon signed-rank test to decide whether one agent
//! is significantly better than the other.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod json_output;
pub mod paired;
pub mod report;
pub mod stats;
pub mod table;
