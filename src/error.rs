//! Error types for loading and analyzing score tables

use thiserror::Error;

/// Errors raised while reading a score table from its source
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {source_name}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {source_name}{}: {message}", line_suffix(.line))]
    Parse {
        source_name: String,
        line: Option<u64>,
        message: String,
    },

    #[error(
        "Non-numeric value {value:?} in column '{column}' at row {row} of {source_name} \
         (all scores must be finite numbers)"
    )]
    NonNumeric {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// The table parsed but cannot be analyzed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Input file must have at least 2 columns (found {found})")]
    TooFewColumns { found: usize },

    #[error("Input file has a header but no score rows")]
    NoRows,

    #[error("Table has {names} column names but {columns} score columns")]
    ColumnCountMismatch { names: usize, columns: usize },

    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Column '{column}' has a non-finite score at row {row}")]
    NonFinite { column: String, row: usize },
}

/// The signed-rank test is undefined for this input
///
/// Recovered by the caller: the report marks the test as not applicable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DegenerateInputError {
    #[error("no paired rows to test")]
    Empty,

    #[error("every score difference is zero")]
    AllZero,
}

/// Any failure that ends an analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}
