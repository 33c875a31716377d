//! Score table loading
//!
//! A self-play run produces one CSV row per game with one score column per
//! agent. This module reads that CSV (from a file or standard input) into an
//! immutable [`ResultTable`] and rejects anything the analysis cannot use.

use crate::error::{LoadError, Result, ShapeError};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Where the score table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read the table from standard input
    Stdin,
    /// Read the table from a file
    Path(PathBuf),
}

impl InputSource {
    /// Interpret the positional CLI argument (`-` or absent means stdin)
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => InputSource::Stdin,
            Some(path) => InputSource::Path(PathBuf::from(path)),
        }
    }

    /// Name used in error messages
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::Path(path) => path.display().to_string(),
        }
    }
}

/// Paired (or multi-player) game scores, one column per agent
///
/// Columns keep their input order. Invariants: at least two columns, at
/// least one row, every value finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    names: Vec<String>,
    /// Column-major score storage
    columns: Vec<Vec<f64>>,
}

impl ResultTable {
    /// Build a table from column names and column-major values
    ///
    /// Rejects tables that break the invariants above, including columns of
    /// unequal length.
    pub fn new(
        names: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> std::result::Result<Self, ShapeError> {
        if names.len() < 2 {
            return Err(ShapeError::TooFewColumns { found: names.len() });
        }
        if names.len() != columns.len() {
            return Err(ShapeError::ColumnCountMismatch {
                names: names.len(),
                columns: columns.len(),
            });
        }

        let rows = columns[0].len();
        if rows == 0 {
            return Err(ShapeError::NoRows);
        }

        for (name, values) in names.iter().zip(&columns) {
            if values.len() != rows {
                return Err(ShapeError::RaggedColumn {
                    column: name.clone(),
                    expected: rows,
                    found: values.len(),
                });
            }
            if let Some(idx) = values.iter().position(|&v| !is_valid_score(v)) {
                return Err(ShapeError::NonFinite {
                    column: name.clone(),
                    row: idx + 1,
                });
            }
        }

        Ok(Self { names, columns })
    }

    /// Column names in input order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Values of the column at `idx`
    pub fn column(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }

    /// Iterate over `(name, values)` pairs in input order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }

    pub fn n_columns(&self) -> usize {
        self.names.len()
    }
}

/// Load a score table from a file or standard input
///
/// The whole table is materialized before the source is released.
pub fn load_table(source: &InputSource) -> Result<ResultTable> {
    let source_name = source.display_name();
    tracing::debug!("Loading score table from {}", source_name);

    match source {
        InputSource::Stdin => read_table(std::io::stdin().lock(), &source_name),
        InputSource::Path(path) => {
            let file = File::open(path).map_err(|e| LoadError::Io {
                source_name: source_name.clone(),
                source: e,
            })?;
            read_table(file, &source_name)
        }
    }
}

/// Parse CSV text with a header row into a [`ResultTable`]
pub fn read_table<R: Read>(reader: R, source_name: &str) -> Result<ResultTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = csv_reader
        .headers()
        .map_err(|e| csv_error(e, source_name))?
        .iter()
        .map(str::to_string)
        .collect();

    // Shape is checked before any row is parsed
    if names.len() < 2 {
        return Err(ShapeError::TooFewColumns { found: names.len() }.into());
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| csv_error(e, source_name))?;
        for (col_idx, cell) in record.iter().enumerate() {
            let value = parse_score(cell).ok_or_else(|| LoadError::NonNumeric {
                source_name: source_name.to_string(),
                row: row_idx + 1,
                column: names[col_idx].clone(),
                value: cell.to_string(),
            })?;
            columns[col_idx].push(value);
        }
    }

    let table = ResultTable::new(names, columns)?;
    tracing::debug!(
        "Loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.n_columns(),
        source_name
    );
    Ok(table)
}

/// Scores must be finite
fn is_valid_score(value: f64) -> bool {
    value.is_finite()
}

fn parse_score(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|&v| is_valid_score(v))
}

fn csv_error(err: csv::Error, source_name: &str) -> crate::error::AnalysisError {
    let line = err.position().map(csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io {
            source_name: source_name.to_string(),
            source,
        },
        _ => LoadError::Parse {
            source_name: source_name.to_string(),
            line,
            message,
        },
    }
    .into()
}
