//! Regressor trait definition.

use crate::error::Result;
use crate::model::FeatureMatrix;

/// Supervised model mapping feature rows to a target value.
pub trait Regressor: Send + Sync {
    /// Fit on a feature matrix and one target value per row.
    fn fit(&mut self, x: &FeatureMatrix, y: &[f64]) -> Result<()>;

    /// Predict one value per row of `x`.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}
