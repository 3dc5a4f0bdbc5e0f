//! Table error types.

use thiserror::Error;

use crate::model::DataType;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while building, loading or writing order tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A required column is absent
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Two columns share a name
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column does not match the table height
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A column has the wrong type for the operation
    #[error("Column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    /// The table source could not be opened or read
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A record could not be parsed
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    /// The table sink failed
    #[error("Write failed: {0}")]
    Write(String),
}

impl TableError {
    /// True when the source itself could not be loaded, as opposed to a
    /// structural problem with the data it returned.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            TableError::SourceUnavailable { .. } | TableError::Parse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let error = TableError::MissingColumn("ord_qty".to_string());
        assert_eq!(error.to_string(), "Missing column: ord_qty");
    }

    #[test]
    fn test_length_mismatch_display() {
        let error = TableError::LengthMismatch {
            column: "item_price".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            error.to_string(),
            "Column 'item_price' has 2 rows, expected 3"
        );
    }

    #[test]
    fn test_source_unavailable_display() {
        let error = TableError::SourceUnavailable {
            path: "data/raw/order_train0.csv".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Source unavailable: data/raw/order_train0.csv: No such file or directory"
        );
    }

    #[test]
    fn test_is_source_unavailable() {
        let missing = TableError::SourceUnavailable {
            path: "x.csv".to_string(),
            reason: "gone".to_string(),
        };
        let parse = TableError::Parse {
            line: 4,
            reason: "bad record".to_string(),
        };
        assert!(missing.is_source_unavailable());
        assert!(parse.is_source_unavailable());
        assert!(!TableError::MissingColumn("a".to_string()).is_source_unavailable());
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(TableError::Write("disk full".to_string()));
        assert_eq!(error.to_string(), "Write failed: disk full");
    }
}
