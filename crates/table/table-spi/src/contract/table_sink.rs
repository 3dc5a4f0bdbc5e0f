//! Table sink trait definition.

use crate::error::Result;
use crate::model::Table;

/// Destination for a processed table.
pub trait TableSink: Send + Sync {
    /// Sink name used in logs.
    fn name(&self) -> &str;

    /// Write the whole table.
    fn write(&self, table: &Table) -> Result<()>;
}
