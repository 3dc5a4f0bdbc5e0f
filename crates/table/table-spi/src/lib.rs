//! Order Table Service Provider Interface
//!
//! Defines the columnar table model shared by every stage of the demand
//! pipeline, the source/sink contracts used to load and persist it, and the
//! [`TableError`] type.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{TableSink, TableSource};
pub use error::{Result, TableError};
pub use model::{
    mean, percentile, sample_std, sorted_present, Column, ColumnData, ColumnSummary, DataType,
    Table,
};

/// Conventional column names of the raw order dataset.
pub mod columns {
    pub const ORDER_DATE: &str = "order_date";
    pub const ITEM_PRICE: &str = "item_price";
    pub const ORD_QTY: &str = "ord_qty";
    pub const SALES_CHAN_NAME: &str = "sales_chan_name";
    pub const SALES_REGION_CODE: &str = "sales_region_code";
    pub const ITEM_CODE: &str = "item_code";
    pub const FIRST_CATE_CODE: &str = "first_cate_code";
    pub const SECOND_CATE_CODE: &str = "second_cate_code";
}
