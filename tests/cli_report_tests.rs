//! End-to-end tests for the selfplay-analyze binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests
//!
//! Score tables go in through a file or stdin; the report comes out on stdout.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_scores(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_small_sample_from_file() {
    // Three wins for A are not enough for significance
    let tmp_dir = TempDir::new().unwrap();
    let input = write_scores(&tmp_dir, "scores.csv", "A,B\n10,5\n10,5\n10,5\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Descriptive Statistics"))
        .stdout(predicate::str::contains("# Win Counts"))
        .stdout(predicate::str::contains("| A    |    3 |  100.00% |"))
        .stdout(predicate::str::contains("| B    |    0 |    0.00% |"))
        .stdout(predicate::str::contains("| Ties |    0 |    0.00% |"))
        .stdout(predicate::str::contains(
            "No significant difference between A and B",
        ))
        .stdout(predicate::str::contains(" - p-value A > B: 0.125"))
        .stdout(predicate::str::contains(" - p-value A < B: 0.875"));
}

#[test]
fn test_reads_stdin_when_no_argument() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A,B\n10,5\n10,5\n10,5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Win Counts"));
}

#[test]
fn test_reads_stdin_with_dash() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.arg("-")
        .write_stdin("A,B\n1,2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Descriptive Statistics"));
}

#[test]
fn test_significant_winner() {
    // A(d=2) beats B(d=0) in all 12 games by growing margins
    let mut csv = String::from("A(d=2),B(d=0)\n");
    for i in 1..=12 {
        csv.push_str(&format!("{},10\n", 10 + i));
    }

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin(csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A(d=2) is significantly better than B(d=0) (p < 0.05)",
        ));
}

#[test]
fn test_second_column_significant_winner() {
    let mut csv = String::from("A,B\n");
    for _ in 0..12 {
        csv.push_str("3,8\n");
    }

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin(csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "B is significantly better than A (p < 0.05)",
        ))
        .stdout(predicate::str::contains(" - p-value A > B: 1"))
        .stdout(predicate::str::contains(" - p-value A < B: 0"));
}

#[test]
fn test_three_players_skip_paired_analysis() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A,B,C\n10,5,7\n8,9,6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Descriptive Statistics"))
        .stdout(predicate::str::contains(
            "Skipping paired analysis: more than 2 players found.",
        ))
        .stdout(predicate::str::contains("# Win Counts").not())
        .stdout(predicate::str::contains("Wilcoxon").not());
}

#[test]
fn test_identical_columns_not_applicable() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A,B\n7,7\n9,9\n3,3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Ties |    3 |  100.00% |"))
        .stdout(predicate::str::contains("Test not applicable"));
}

#[test]
fn test_single_column_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A\n1\n2\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Input file must have at least 2 columns",
        ));
}

#[test]
fn test_missing_file_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let missing = tmp_dir.path().join("missing.csv");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read"))
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn test_non_numeric_score_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A,B\n1,2\nx,3\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Non-numeric value \"x\""))
        .stderr(predicate::str::contains("column 'A' at row 2"));
}

#[test]
fn test_ragged_row_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.write_stdin("A,B\n1,2\n3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse <stdin>"));
}

#[test]
fn test_output_is_deterministic() {
    let tmp_dir = TempDir::new().unwrap();
    let input = write_scores(&tmp_dir, "scores.csv", "A,B\n3,1\n2,2\n5,9\n7,1\n4,4\n");

    let first = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze")
        .arg(&input)
        .output()
        .unwrap();
    let second = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze")
        .arg(&input)
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_verbose_shows_test_details() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.arg("--verbose")
        .write_stdin("A,B\n10,5\n10,5\n10,5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Score Differences (A - B)"))
        .stdout(predicate::str::contains(" - statistic (R+): 6"))
        .stdout(predicate::str::contains(" - method: exact"));
}

#[test]
fn test_json_format() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze")
        .args(["--format", "json"])
        .write_stdin("A,B\n10,5\n10,5\n10,5\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["paired"]["wins"]["first_wins"], 3);
    assert_eq!(value["paired"]["significance"]["test"]["p_less"], 0.875);
}

#[test]
fn test_debug_logs_to_stderr_only() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("selfplay-analyze");
    cmd.arg("--debug")
        .write_stdin("A,B\n10,5\n10,5\n10,5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded").not())
        .stderr(predicate::str::contains("Loaded 3 rows x 2 columns"));
}
