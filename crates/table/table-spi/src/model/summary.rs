//! Descriptive statistics for a numeric column.

use serde::{Deserialize, Serialize};

use super::stats::{mean, percentile, sample_std, sorted_present};

/// Summary of one numeric column, in the layout of a classic `describe()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summarize the present values of a column.
    pub fn from_values(name: &str, values: &[Option<f64>]) -> Self {
        let sorted = sorted_present(values);
        let quantile = |p: f64| {
            if sorted.is_empty() {
                None
            } else {
                Some(percentile(&sorted, p))
            }
        };

        Self {
            name: name.to_string(),
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied(),
            q25: quantile(0.25),
            q50: quantile(0.5),
            q75: quantile(0.75),
            max: sorted.last().copied(),
        }
    }
}
