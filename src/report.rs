//! Text report rendering
//!
//! Markdown-flavored tables in a fixed order: descriptive statistics, win
//! counts (or the multi-player skip notice), then the signed-rank test
//! section. Output does not depend on where stdout is going.

use crate::analysis::{AnalysisReport, PairedSection};
use crate::config::Verbosity;
use crate::paired::{format_rate, PairedAssessment, RankMethod, TestOutcome};
use crate::stats::ColumnSummary;

/// Notice printed instead of the paired sections for multi-player tables
pub const SKIP_NOTICE: &str = "Skipping paired analysis: more than 2 players found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Minimal pipe-table builder
#[derive(Debug)]
struct MarkdownTable {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    fn new(headers: Vec<String>, aligns: Vec<Align>) -> Self {
        debug_assert_eq!(headers.len(), aligns.len());
        Self {
            headers,
            aligns,
            rows: Vec::new(),
        }
    }

    fn add_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
                    .max(2)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&self.render_line(&self.headers, &widths));

        let separator: Vec<String> = widths
            .iter()
            .zip(&self.aligns)
            .map(|(&w, align)| match align {
                Align::Left => format!(":{}", "-".repeat(w + 1)),
                Align::Right => format!("{}:", "-".repeat(w + 1)),
            })
            .collect();
        out.push_str(&format!("|{}|\n", separator.join("|")));

        for row in &self.rows {
            out.push_str(&self.render_line(row, &widths));
        }
        out
    }

    fn render_line(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .zip(&self.aligns)
            .map(|((cell, &w), align)| {
                let pad = " ".repeat(w.saturating_sub(cell.chars().count()));
                match align {
                    Align::Left => format!(" {}{} ", cell, pad),
                    Align::Right => format!(" {}{} ", pad, cell),
                }
            })
            .collect();
        format!("|{}|\n", padded.join("|"))
    }
}

/// Format a number with up to six significant digits, `%g` style
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // The exponent is taken after rounding to six significant digits
    let scientific = format!("{:.5e}", value);
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = match exp.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };
    if !(-4..6).contains(&exponent) {
        return format!("{}e{}", trim_fraction(mantissa), exponent);
    }

    let decimals = (5 - exponent).max(0) as usize;
    trim_fraction(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn describe_table(summaries: &[ColumnSummary]) -> String {
    let mut headers = vec![String::new()];
    headers.extend(summaries.iter().map(|s| s.name.clone()));
    let mut aligns = vec![Align::Left];
    aligns.extend(summaries.iter().map(|_| Align::Right));

    let mut table = MarkdownTable::new(headers, aligns);
    let stat_rows: [(&str, fn(&ColumnSummary) -> String); 8] = [
        ("count", |s: &ColumnSummary| s.count.to_string()),
        ("mean", |s: &ColumnSummary| format_number(s.mean)),
        ("std", |s: &ColumnSummary| format_number(s.std.unwrap_or(f64::NAN))),
        ("min", |s: &ColumnSummary| format_number(s.min)),
        ("25%", |s: &ColumnSummary| format_number(s.p25)),
        ("50%", |s: &ColumnSummary| format_number(s.median)),
        ("75%", |s: &ColumnSummary| format_number(s.p75)),
        ("max", |s: &ColumnSummary| format_number(s.max)),
    ];
    for (label, value) in stat_rows {
        let mut row = vec![label.to_string()];
        row.extend(summaries.iter().map(value));
        table.add_row(row);
    }
    table.render()
}

fn win_table(assessment: &PairedAssessment) -> String {
    let mut table = MarkdownTable::new(
        vec![String::new(), "Wins".to_string(), "Win Rate".to_string()],
        vec![Align::Left, Align::Right, Align::Right],
    );
    let tally = &assessment.tally;
    for (label, wins, rate) in [
        (assessment.first.as_str(), tally.first_wins, tally.first_win_rate()),
        (assessment.second.as_str(), tally.second_wins, tally.second_win_rate()),
        ("Ties", tally.ties, tally.tie_rate()),
    ] {
        table.add_row(vec![label.to_string(), wins.to_string(), format_rate(rate)]);
    }
    table.render()
}

fn significance_section(assessment: &PairedAssessment, verbosity: Verbosity) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", assessment.verdict_line()));

    let TestOutcome::Completed { test, .. } = &assessment.outcome else {
        return out;
    };

    out.push_str(&format!(
        " - p-value {} > {}: {}\n",
        assessment.first, assessment.second, test.p_greater
    ));
    out.push_str(&format!(
        " - p-value {} < {}: {}\n",
        assessment.first, assessment.second, test.p_less
    ));

    if verbosity == Verbosity::Detailed {
        out.push_str(&format!(
            " - statistic (R+): {}\n",
            format_number(test.statistic)
        ));
        out.push_str(&format!(" - method: {}\n", test.method));
        if let (RankMethod::Normal, Some(z)) = (test.method, test.z_score) {
            out.push_str(&format!(" - z-score: {}\n", format_number(z)));
        }
        out.push_str(&format!(
            " - games: {} ({} with equal scores)\n",
            test.n, test.n_zero
        ));
    }
    out
}

impl AnalysisReport {
    /// Generate the human-readable report
    pub fn to_report_string(&self) -> String {
        let verbosity = self.config.verbosity;
        let mut report = String::new();

        report.push_str("# Descriptive Statistics\n\n");
        report.push_str(&describe_table(&self.summaries));

        match &self.paired {
            PairedSection::Skipped { .. } => {
                report.push_str(&format!("\n{}\n", SKIP_NOTICE));
            }
            PairedSection::Analyzed(assessment) => {
                report.push_str("\n# Win Counts\n\n");
                report.push_str(&win_table(assessment));

                if verbosity == Verbosity::Detailed {
                    if let Some(delta) = &assessment.delta_summary {
                        report.push_str(&format!(
                            "\n# Score Differences ({} - {})\n\n",
                            assessment.first, assessment.second
                        ));
                        report.push_str(&describe_table(std::slice::from_ref(delta)));
                    }
                }

                report.push_str("\n# Wilcoxon Signed-Rank Test\n\n");
                report.push_str(&significance_section(assessment, verbosity));
            }
        }

        report
    }
}
