//! Table model types.

mod column;
mod stats;
mod summary;
mod table;

pub use column::{Column, ColumnData, DataType};
pub use stats::{mean, percentile, sample_std, sorted_present};
pub use summary::ColumnSummary;
pub use table::Table;
