//! Model Facade
//!
//! Unified re-exports for the model module.
//!
//! - `model_spi` - Regressor/Forecaster traits, feature matrix, errors
//! - `model_core` - Linear regression, ARIMA, metrics, resampling
//!
//! # Example
//!
//! ```rust
//! use model_facade::{Arima, Forecaster};
//!
//! let monthly: Vec<f64> = (1..=24).map(|m| 100.0 + m as f64).collect();
//! let (p, d, q) = Arima::default_order();
//! let mut model = Arima::new(p, d, q).unwrap();
//! model.fit(&monthly).unwrap();
//! assert_eq!(model.forecast(3).unwrap().len(), 3);
//! ```

// Re-export everything from SPI
pub use model_spi::*;

// Re-export everything from Core
pub use model_core::*;
