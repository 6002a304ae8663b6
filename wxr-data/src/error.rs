/// Error types for aggregation and threshold estimation
use thiserror::Error;

/// Caller mistakes. Retrying with the same input cannot succeed.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    /// Filter key must have one position per observation field
    #[error("Incorrect filter length: expected {expected} columns, found {found}")]
    FilterKeyLength { expected: usize, found: usize },

    /// Rarity must be at least one period
    #[error("Frequency must be a positive integer, got {0}")]
    InvalidFrequency(String),

    /// Aggregation mode text not recognised
    #[error("Unknown aggregation mode: {0}")]
    UnknownMode(String),

    /// Direction text not recognised
    #[error("Direction must be either 'high' or 'low', got {0}")]
    UnknownDirection(String),
}

/// Main error type for the analysis pipeline
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every period was invalid, so no quantile exists
    #[error("There is no usable data for this aggregation")]
    NoUsableData,
}

/// Type alias for Results using AnalysisError
pub type Result<T> = std::result::Result<T, AnalysisError>;
