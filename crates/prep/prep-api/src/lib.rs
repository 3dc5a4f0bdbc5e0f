//! Preparation Consumer API
//!
//! Configuration types and builders for the preparation stages:
//!
//! - [`CleanConfig`]: columns, date policy and outlier capping
//! - [`FeatureConfig`]: date column, holiday region and promotion days
//! - [`EncoderConfig`]: exclusions and unknown-category policy
//! - [`PrepConfig`]: all of the above, loadable from JSON

mod config;

pub use config::{
    CleanConfig, CleanConfigBuilder, EncoderConfig, FeatureConfig, InvalidDatePolicy, PrepConfig,
    UnknownCategoryPolicy, DEFAULT_PROMO_DAYS,
};

// Re-export SPI types used in signatures
pub use prep_spi::{PrepError, Result};
