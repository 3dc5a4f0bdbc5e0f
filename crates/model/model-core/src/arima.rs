//! ARIMA demand forecaster
//!
//! Fits an ARIMA(p, d, q) model to an aggregated demand series:
//!
//! - **AR**: Yule-Walker coefficients via Levinson-Durbin recursion
//! - **I**: `d` rounds of differencing, undone after forecasting
//! - **MA**: coefficients from the autocorrelation of AR residuals

use model_spi::{Forecaster, ModelError, Result};
use serde::{Deserialize, Serialize};

/// ARIMA model for demand series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arima {
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series
    constant: f64,
    /// Last value of the series at each differencing level
    anchors: Vec<f64>,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
    fitted: bool,
}

impl Arima {
    /// Order used when none is configured: ARIMA(5, 1, 0).
    pub fn default_order() -> (usize, usize, usize) {
        (5, 1, 0)
    }

    /// Create a new ARIMA model with specified orders
    ///
    /// # Arguments
    ///
    /// * `p` - Order of autoregressive component (0-10)
    /// * `d` - Degree of differencing (0-2)
    /// * `q` - Order of moving average component (0-10)
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > 10 {
            return Err(ModelError::InvalidParameter {
                name: "p".to_string(),
                reason: "AR order must be <= 10".to_string(),
            });
        }
        if d > 2 {
            return Err(ModelError::InvalidParameter {
                name: "d".to_string(),
                reason: "Differencing order must be <= 2".to_string(),
            });
        }
        if q > 10 {
            return Err(ModelError::InvalidParameter {
                name: "q".to_string(),
                reason: "MA order must be <= 10".to_string(),
            });
        }

        Ok(Self {
            p,
            d,
            q,
            ar_coeffs: vec![0.0; p],
            ma_coeffs: vec![0.0; q],
            constant: 0.0,
            anchors: Vec::new(),
            differenced: Vec::new(),
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Minimum series length accepted by `fit`.
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 10
    }

    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    fn difference(data: &[f64]) -> Vec<f64> {
        data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Integrate forecasts back through every differencing level.
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        let mut result = forecasts.to_vec();
        for &last in self.anchors.iter().rev() {
            let mut level = last;
            for value in result.iter_mut() {
                level += *value;
                *value = level;
            }
        }
        result
    }

    /// Estimate AR coefficients using Yule-Walker equations
    fn estimate_ar_coefficients(&self, data: &[f64]) -> Vec<f64> {
        if self.p == 0 {
            return Vec::new();
        }

        let n = data.len();
        let mean: f64 = data.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = data.iter().map(|x| x - mean).collect();

        let autocorr: Vec<f64> = (0..=self.p)
            .map(|k| (k..n).map(|i| centered[i] * centered[i - k]).sum::<f64>() / n as f64)
            .collect();

        // Levinson-Durbin
        let mut coeffs = vec![0.0; self.p];
        if autocorr[0].abs() > 1e-10 {
            coeffs[0] = autocorr[1] / autocorr[0];

            for k in 1..self.p {
                let mut sum = autocorr[k + 1];
                let mut denom = autocorr[0];
                for j in 0..k {
                    sum -= coeffs[j] * autocorr[k - j];
                    denom -= coeffs[j] * autocorr[j + 1];
                }

                if denom.abs() > 1e-10 {
                    let reflection = sum / denom;
                    let previous = coeffs.clone();
                    coeffs[k] = reflection;
                    for j in 0..k {
                        coeffs[j] = previous[j] - reflection * previous[k - 1 - j];
                    }
                }
            }
        }

        coeffs
    }

    /// Estimate MA coefficients from residuals
    fn estimate_ma_coefficients(&self, residuals: &[f64]) -> Vec<f64> {
        if self.q == 0 || residuals.is_empty() {
            return vec![0.0; self.q];
        }

        let n = residuals.len();
        let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
        let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

        if var.abs() <= 1e-10 {
            return vec![0.0; self.q];
        }

        (0..self.q)
            .map(|k| {
                let sum: f64 = ((k + 1)..n)
                    .map(|i| centered[i] * centered[i - k - 1])
                    .sum();
                // Bounded for stability
                ((sum / n as f64) / var).clamp(-0.99, 0.99)
            })
            .collect()
    }
}

impl Default for Arima {
    fn default() -> Self {
        let (p, d, q) = Self::default_order();
        Self {
            p,
            d,
            q,
            ar_coeffs: vec![0.0; p],
            ma_coeffs: vec![0.0; q],
            constant: 0.0,
            anchors: Vec::new(),
            differenced: Vec::new(),
            residuals: Vec::new(),
            fitted: false,
        }
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &[f64]) -> Result<()> {
        let min_required = self.min_observations();
        if series.len() < min_required {
            return Err(ModelError::InsufficientData {
                required: min_required,
                actual: series.len(),
            });
        }

        if series.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InvalidData(
                "Data contains NaN or infinite values".to_string(),
            ));
        }

        let mut anchors = Vec::with_capacity(self.d);
        let mut differenced = series.to_vec();
        for _ in 0..self.d {
            anchors.push(differenced[differenced.len() - 1]);
            differenced = Self::difference(&differenced);
        }

        let ar_coeffs = self.estimate_ar_coefficients(&differenced);

        let n = differenced.len();
        let mean: f64 = differenced.iter().sum::<f64>() / n as f64;
        let mut residuals = vec![0.0; n];
        for i in self.p..n {
            let prediction = mean
                + (0..self.p)
                    .map(|j| ar_coeffs[j] * (differenced[i - j - 1] - mean))
                    .sum::<f64>();
            residuals[i] = differenced[i] - prediction;
        }

        self.ma_coeffs = self.estimate_ma_coefficients(&residuals);
        self.ar_coeffs = ar_coeffs;
        self.constant = mean;
        self.anchors = anchors;
        self.differenced = differenced;
        self.residuals = residuals;
        self.fitted = true;

        tracing::debug!(
            p = self.p,
            d = self.d,
            q = self.q,
            observations = series.len(),
            "fitted ARIMA"
        );
        Ok(())
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(ModelError::NotFitted);
        }

        if steps == 0 {
            return Ok(Vec::new());
        }

        let n = self.differenced.len();
        let mut extended = self.differenced.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let mut forecast = self.constant;

            for j in 0..self.p {
                let idx = extended.len() - j - 1;
                forecast += self.ar_coeffs[j] * (extended[idx] - self.constant);
            }

            for j in 0..self.q.min(extended_residuals.len()) {
                let idx = extended_residuals.len() - j - 1;
                forecast += self.ma_coeffs[j] * extended_residuals[idx];
            }

            extended.push(forecast);
            // Future residuals are 0
            extended_residuals.push(0.0);
        }

        Ok(self.undifference(&extended[n..]))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
