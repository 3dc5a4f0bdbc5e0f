//! Order Table Facade
//!
//! Unified re-exports for the table module.
//!
//! - `table_spi` - Table model, source/sink traits and errors
//! - `table_core` - CSV source/sink and schema inference
//!
//! # Example
//!
//! ```rust,no_run
//! use table_facade::{CsvTableSource, Schema, TableSource};
//!
//! let table = CsvTableSource::new("data/raw/order_train0.csv")
//!     .with_schema(Schema::orders())
//!     .load()
//!     .unwrap();
//! for summary in table.describe() {
//!     println!("{}: mean={:?}", summary.name, summary.mean);
//! }
//! ```

// Re-export everything from SPI
pub use table_spi::*;

// Re-export everything from Core
pub use table_core::*;
