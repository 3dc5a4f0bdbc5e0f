//! Order Table Core
//!
//! Implementations of the table contracts:
//!
//! - [`CsvTableSource`]: load a delimited file into a [`Table`](table_spi::Table)
//! - [`CsvTableSink`]: write a table back out
//! - [`Schema`]: declared column types, with inference for the rest

pub mod csv_sink;
pub mod csv_source;
pub mod schema;

pub use csv_sink::CsvTableSink;
pub use csv_source::CsvTableSource;
pub use schema::{infer_type, parse_date, Schema, DEFAULT_DATE_FORMATS};
