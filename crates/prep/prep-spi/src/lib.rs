//! Preparation Service Provider Interface
//!
//! Defines the traits, label types and errors shared by the order data
//! preparation stages:
//!
//! - [`TableStep`]: a table-in, table-out stage
//! - [`HolidayCalendar`]: injected public holiday lookup
//! - [`Season`] / [`MonthPhase`]: calendar labels
//! - [`PrepError`]: standardized error type

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{HolidayCalendar, TableStep};
pub use error::{PrepError, Result};
pub use model::{feature_columns, MonthPhase, Season};
