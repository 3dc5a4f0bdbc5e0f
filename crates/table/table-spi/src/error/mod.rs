//! Error types for table operations.

mod table_error;

pub use table_error::{Result, TableError};
