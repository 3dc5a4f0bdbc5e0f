//! Forecaster trait definition.

use crate::error::Result;

/// Univariate time series model.
pub trait Forecaster: Send + Sync {
    /// Fit the model to a series ordered oldest first
    fn fit(&mut self, series: &[f64]) -> Result<()>;

    /// Forecast the next `steps` values
    fn forecast(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}
