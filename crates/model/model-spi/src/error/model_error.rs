//! Model error types.

use table_spi::TableError;
use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while fitting, predicting or evaluating models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model must be fitted before prediction
    #[error("Model not fitted: call fit() before predict()")]
    NotFitted,

    /// Numerical computation failed (e.g. singular matrix)
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid input data (NaN, Inf, wrong column type)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Feature count does not match the fitted model
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Table access failed
    #[error(transparent)]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::InsufficientData {
            required: 16,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need at least 16 points, got 5"
        );

        let err = ModelError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn test_table_error_is_transparent() {
        let err: ModelError = TableError::MissingColumn("ord_qty".to_string()).into();
        assert_eq!(err.to_string(), "Missing column: ord_qty");
    }
}
