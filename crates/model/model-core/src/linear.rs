//! Ridge-regularized linear regression
//!
//! Solves `(XᵀX + αI) β = Xᵀy` on centered data, so the intercept is never
//! penalized. With the default `alpha` this is ordinary least squares with
//! just enough regularization to survive collinear one-hot columns.

use model_spi::{FeatureMatrix, ModelError, Regressor, Result};
use serde::{Deserialize, Serialize};

/// Linear regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// L2 penalty
    alpha: f64,
    /// One coefficient per feature
    coefficients: Vec<f64>,
    intercept: f64,
    /// Feature names seen while fitting
    feature_names: Vec<String>,
    fitted: bool,
}

impl LinearRegression {
    /// Create a new model
    ///
    /// # Arguments
    ///
    /// * `alpha` - L2 penalty, `>= 0`
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha >= 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "alpha".to_string(),
                reason: "must be a non-negative number".to_string(),
            });
        }
        Ok(Self {
            alpha,
            coefficients: Vec::new(),
            intercept: 0.0,
            feature_names: Vec::new(),
            fitted: false,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// (feature name, coefficient) pairs in feature order.
    pub fn named_coefficients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.coefficients.iter().copied())
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self {
            alpha: 1e-6,
            coefficients: Vec::new(),
            intercept: 0.0,
            feature_names: Vec::new(),
            fitted: false,
        }
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &FeatureMatrix, y: &[f64]) -> Result<()> {
        let n = x.n_rows();
        let k = x.n_features();
        if n != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: n,
                actual: y.len(),
            });
        }
        if n < 2 {
            return Err(ModelError::InsufficientData {
                required: 2,
                actual: n,
            });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidData(
                "Target contains NaN or infinite values".to_string(),
            ));
        }

        let x_mean: Vec<f64> = (0..k)
            .map(|j| x.rows().iter().map(|r| r[j]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        // Normal equations on centered data, row-major k x k
        let mut gram = vec![0.0; k * k];
        let mut rhs = vec![0.0; k];
        for (row, target) in x.rows().iter().zip(y) {
            let centered: Vec<f64> = row.iter().zip(&x_mean).map(|(v, m)| v - m).collect();
            for i in 0..k {
                rhs[i] += centered[i] * (target - y_mean);
                for j in 0..k {
                    gram[i * k + j] += centered[i] * centered[j];
                }
            }
        }
        for i in 0..k {
            gram[i * k + i] += self.alpha;
        }

        let coefficients = solve_system(gram, rhs, k)?;
        self.intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(b, m)| b * m)
                .sum::<f64>();
        self.coefficients = coefficients;
        self.feature_names = x.names().to_vec();
        self.fitted = true;

        tracing::debug!(features = k, rows = n, intercept = self.intercept, "fitted linear regression");
        Ok(())
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }
        if x.n_features() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: x.n_features(),
            });
        }

        Ok(x.rows()
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(v, b)| v * b)
                        .sum::<f64>()
            })
            .collect())
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Gaussian elimination with partial pivoting on a row-major `n x n` system.
fn solve_system(mut a: Vec<f64>, mut b: Vec<f64>, n: usize) -> Result<Vec<f64>> {
    for i in 0..n {
        // Find pivot
        let mut max_row = i;
        for r in (i + 1)..n {
            if a[r * n + i].abs() > a[max_row * n + i].abs() {
                max_row = r;
            }
        }
        if a[max_row * n + i].abs() < 1e-12 {
            return Err(ModelError::NumericalError(
                "Singular system: features are linearly dependent".to_string(),
            ));
        }

        // Swap rows
        if max_row != i {
            for j in 0..n {
                a.swap(i * n + j, max_row * n + j);
            }
            b.swap(i, max_row);
        }

        // Eliminate below
        for r in (i + 1)..n {
            let factor = a[r * n + i] / a[i * n + i];
            for j in i..n {
                a[r * n + j] -= factor * a[i * n + j];
            }
            b[r] -= factor * b[i];
        }
    }

    // Back substitution
    let mut solution = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i * n + j] * solution[j];
        }
        solution[i] = sum / a[i * n + i];
    }
    Ok(solution)
}
