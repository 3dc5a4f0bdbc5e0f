//! Preparation error types.

use table_spi::TableError;
use thiserror::Error;

/// Result type for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Errors raised by the cleaner, the feature deriver and the encoder.
///
/// All of these are structural contract violations. Per-value anomalies
/// (outliers, unparseable dates) are handled inside the stages and never
/// surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrepError {
    /// A required column is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// The date column is not parsed, or holds absent values
    #[error("Invalid date column '{column}': {reason}")]
    InvalidDateColumn { column: String, reason: String },

    /// The stage needs at least one row
    #[error("Empty table: at least one row is required")]
    EmptyTable,

    /// No categorical column is left to encode
    #[error("No categorical columns to encode")]
    EmptyColumnSet,

    /// A column has the wrong type for the stage
    #[error("Column '{column}' has type {actual}, expected {expected}")]
    InvalidColumnType {
        column: String,
        expected: String,
        actual: String,
    },

    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A category not seen while fitting the encoder
    #[error("Unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other table failure
    #[error(transparent)]
    Table(TableError),
}

impl From<TableError> for PrepError {
    fn from(error: TableError) -> Self {
        match error {
            TableError::MissingColumn(column) => PrepError::MissingColumn(column),
            other => PrepError::Table(other),
        }
    }
}
