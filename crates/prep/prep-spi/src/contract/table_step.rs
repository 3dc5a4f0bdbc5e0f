//! Table step trait definition.

use table_spi::Table;

use crate::error::Result;

/// One stage of the preparation pipeline.
///
/// A step reads its input table and returns a new one; it never mutates
/// the input.
pub trait TableStep: Send + Sync {
    /// Apply the step.
    fn apply(&self, table: &Table) -> Result<Table>;

    /// Name of this step
    fn name(&self) -> &str;
}
