//! Dense feature matrix built from a table.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use table_spi::Table;

use crate::error::{ModelError, Result};

/// Row-major matrix of `f64` features with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build from rows, checking that every row has one value per name.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|r| r.len() != names.len()) {
            return Err(ModelError::DimensionMismatch {
                expected: names.len(),
                actual: row.len(),
            });
        }
        Ok(Self { names, rows })
    }

    /// Extract features and target from a table.
    ///
    /// Every Int, Float and Bool column other than `target` and `exclude`
    /// becomes a feature (bools as 0/1). Text and Date columns are skipped.
    /// Rows with an absent or non-finite feature or target are dropped.
    pub fn from_table(table: &Table, target: &str, exclude: &[&str]) -> Result<(Self, Vec<f64>)> {
        let target_data = table.data(target)?;
        let target_values = target_data.to_f64().ok_or_else(|| {
            ModelError::InvalidData(format!(
                "target '{}' must be numeric, found {}",
                target,
                target_data.data_type()
            ))
        })?;

        let mut names = Vec::new();
        let mut columns = Vec::new();
        for column in table.columns() {
            let name = column.name();
            if name == target || exclude.iter().any(|x| *x == name) {
                continue;
            }
            match column.values().to_f64() {
                Some(values) => {
                    names.push(name.to_string());
                    columns.push(values);
                }
                None => {
                    tracing::debug!(column = name, data_type = %column.data_type(), "skipping non-numeric column");
                }
            }
        }

        let mut rows = Vec::with_capacity(table.height());
        let mut y = Vec::with_capacity(table.height());
        for (i, target_value) in target_values.iter().enumerate() {
            let Some(target_value) = target_value.filter(|v| v.is_finite()) else {
                continue;
            };
            let row: Option<Vec<f64>> = columns
                .iter()
                .map(|c| c[i].filter(|v| v.is_finite()))
                .collect();
            if let Some(row) = row {
                rows.push(row);
                y.push(target_value);
            }
        }

        let dropped = table.height() - rows.len();
        if dropped > 0 {
            tracing::warn!(dropped, "dropped rows with missing features or target");
        }
        Ok((Self { names, rows }, y))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of a contiguous block of rows.
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        Self {
            names: self.names.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }
}
