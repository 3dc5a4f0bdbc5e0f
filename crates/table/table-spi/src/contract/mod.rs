//! Contracts for table sources and sinks.

mod table_sink;
mod table_source;

pub use table_sink::TableSink;
pub use table_source::TableSource;
