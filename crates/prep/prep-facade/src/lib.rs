//! Preparation Facade
//!
//! Unified re-exports for the preparation module.
//!
//! - `prep_spi` - Step and holiday calendar traits, labels, errors
//! - `prep_api` - Configuration types and builders
//! - `prep_core` - Cleaner, feature deriver, encoder and pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use prep_facade::{ChinaHolidayCalendar, PrepConfig, PrepPipeline};
//! # fn load() -> prep_facade::Table { unimplemented!() }
//!
//! let pipeline =
//!     PrepPipeline::new(PrepConfig::default(), Box::new(ChinaHolidayCalendar::new())).unwrap();
//! let output = pipeline.run(&load()).unwrap();
//! println!("{:?}", output.encoder.feature_names());
//! ```

// Re-export everything from SPI
pub use prep_spi::*;

// Re-export everything from API
pub use prep_api::*;

// Re-export everything from Core
pub use prep_core::*;

// Table types used throughout the API
pub use table_spi::{columns, Column, ColumnData, DataType, Table, TableError};
