//! Table source trait definition.

use crate::error::Result;
use crate::model::Table;

/// Something that can produce an order table, such as a delimited file.
///
/// Implementations return either a complete table or an error, never
/// partially loaded data.
pub trait TableSource: Send + Sync {
    /// Source name used in logs.
    fn name(&self) -> &str;

    /// Load the whole table.
    fn load(&self) -> Result<Table>;
}
