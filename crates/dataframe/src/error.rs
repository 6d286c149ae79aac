//! Table Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by table construction, ingestion, mutation and reductions
#[derive(Debug, Error)]
pub enum TableError {
    /// Source file could not be opened
    #[error("Invalid source {}: {source}", .path.display())]
    InvalidSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row in a delimited file has a different cell count than the table width
    #[error("Malformed row at line {line}: expected {expected} cells, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Low-level delimited text failure
    #[error("Delimited text error: {0}")]
    Csv(String),

    /// I/O failure while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// In-memory grid is not rectangular
    #[error("Bad table shape: row {row} has {found} cells, expected {expected}")]
    BadShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Header count disagrees with the table width
    #[error("Header row has {headers} labels but the table is {width} columns wide")]
    HeaderWidthMismatch { headers: usize, width: usize },

    /// Row or column length disagrees with the table
    #[error("Size of table and interacting vector are incompatible: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// Labelled operation on a headerless table, or unlabelled operation on a labelled one
    #[error("Header state mismatch: operation disagrees with table header row (table has headers: {table_has_headers})")]
    HeaderStateMismatch { table_has_headers: bool },

    /// Stacked tables carry different header rows
    #[error("Header rows of the stacked tables differ")]
    HeaderLabelMismatch,

    /// Label lookup on a headerless table
    #[error("Table has no header row")]
    NoHeaderRow,

    /// Label not present in the header row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Index magnitude exceeds the table extent
    #[error("Index {index} out of bounds for extent {extent}")]
    IndexOutOfBounds { index: i64, extent: usize },

    /// Median requested over a selection with no numeric values
    #[error("Selection contains no numeric values")]
    EmptySelection,

    /// More rows requested for display than exist
    #[error("More rows requested ({requested}) than exist ({available})")]
    RowsRequested { requested: usize, available: usize },
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => TableError::Io(io),
                other => TableError::Csv(format!("{:?}", other)),
            }
        } else {
            TableError::Csv(err.to_string())
        }
    }
}

/// Convenience alias for table results
pub type Result<T> = std::result::Result<T, TableError>;
