//! Model Service Provider Interface
//!
//! Defines the contracts the demand models implement, the feature matrix
//! they consume, and the [`ModelError`] type.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Forecaster, Regressor};
pub use error::{ModelError, Result};
pub use model::{Evaluation, FeatureMatrix};
