/// Error types for reading station observations
use thiserror::Error;

/// Main error type for observation parsing
#[derive(Error, Debug)]
pub enum ObservationError {
    /// Failed to read or parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to open the input file
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Product code is neither rainfall nor temperature
    #[error("Unknown product code: {0}")]
    UnknownProductCode(String),

    /// Row does not have one cell per observation field
    #[error("Row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell could not be parsed as the column's type
    #[error("Row {row}: invalid {column} value {value:?}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Year, month and day do not form a calendar date
    #[error("Row {row}: {year}-{month}-{day} is not a calendar date")]
    InvalidDate {
        row: usize,
        year: i32,
        month: u32,
        day: u32,
    },

    /// Station name, alias or number not in the registry
    #[error("Unknown station: {0}")]
    UnknownStation(String),
}

/// Type alias for Results using ObservationError
pub type Result<T> = std::result::Result<T, ObservationError>;
