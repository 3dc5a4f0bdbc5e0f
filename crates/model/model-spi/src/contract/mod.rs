//! Contracts for demand models.

mod forecaster;
mod regressor;

pub use forecaster::Forecaster;
pub use regressor::Regressor;
