//! IQR outlier capping
//!
//! Values outside `[Q1 - k*IQR, Q3 + k*IQR]` are clamped to the nearest
//! bound. Rows are never removed.

use prep_spi::{PrepError, Result};
use serde::{Deserialize, Serialize};
use table_spi::{percentile, sorted_present};

/// Quartiles and capping bounds of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Clamp a value into `[lower, upper]`.
    pub fn cap(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Interquartile Range (IQR) based outlier capper
///
/// Same fences as a box plot; quartiles use linear interpolation between
/// ranks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierCapper {
    multiplier: f64,
}

impl OutlierCapper {
    /// Create a new capper
    ///
    /// # Arguments
    ///
    /// * `multiplier` - IQR multiplier for the bounds (typically 1.5)
    pub fn new(multiplier: f64) -> Result<Self> {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(PrepError::InvalidParameter {
                name: "multiplier".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self { multiplier })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Compute bounds from the present values. `None` if there are none.
    pub fn fit(&self, values: &[Option<f64>]) -> Option<IqrBounds> {
        let sorted = sorted_present(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = percentile(&sorted, 0.25);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(IqrBounds {
            q1,
            q3,
            lower: q1 - self.multiplier * iqr,
            upper: q3 + self.multiplier * iqr,
        })
    }

    /// Fit on a column and clamp it. Absent cells stay absent.
    pub fn cap_column(&self, values: &[Option<f64>]) -> (Vec<Option<f64>>, Option<IqrBounds>) {
        match self.fit(values) {
            Some(bounds) => {
                let capped = values.iter().map(|v| v.map(|x| bounds.cap(x))).collect();
                (capped, Some(bounds))
            }
            None => (values.to_vec(), None),
        }
    }
}

impl Default for OutlierCapper {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_rejects_non_positive_multiplier() {
        assert!(OutlierCapper::new(0.0).is_err());
        assert!(OutlierCapper::new(-1.5).is_err());
        assert!(OutlierCapper::new(f64::NAN).is_err());
        assert!(OutlierCapper::new(1.5).is_ok());
    }

    #[test]
    fn test_bounds() {
        // q1 = 2.0, q3 = 4.0 with linear interpolation over 5 points
        let values = column(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        let bounds = OutlierCapper::default().fit(&values).unwrap();
        assert_eq!(bounds.q1, 2.0);
        assert_eq!(bounds.q3, 4.0);
        assert_eq!(bounds.iqr(), 2.0);
        assert_eq!(bounds.lower, -1.0);
        assert_eq!(bounds.upper, 7.0);
    }

    #[test]
    fn test_cap_clamps_both_sides() {
        let values = column(&[-50.0, 2.0, 3.0, 4.0, 100.0]);
        let (capped, bounds) = OutlierCapper::default().cap_column(&values);
        let bounds = bounds.unwrap();
        assert_eq!(capped[0], Some(bounds.lower));
        assert_eq!(capped[4], Some(bounds.upper));
        assert_eq!(&capped[1..4], &values[1..4]);
        assert_eq!(capped.len(), values.len());
    }

    #[test]
    fn test_capping_is_bounded_by_original_fences() {
        let values = column(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 340.0, -90.0]);
        let (capped, bounds) = OutlierCapper::default().cap_column(&values);
        let bounds = bounds.unwrap();
        for v in capped.iter().flatten() {
            assert!(*v >= bounds.lower && *v <= bounds.upper);
        }
    }

    #[test]
    fn test_capping_is_idempotent() {
        let values = column(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 340.0, -90.0]);
        let capper = OutlierCapper::default();
        let (once, bounds) = capper.cap_column(&values);
        let bounds = bounds.unwrap();
        let reapplied: Vec<Option<f64>> = once.iter().map(|v| v.map(|x| bounds.cap(x))).collect();
        assert_eq!(once, reapplied);
    }

    #[test]
    fn test_absent_values_pass_through() {
        let values = vec![Some(1.0), None, Some(2.0)];
        let (capped, _) = OutlierCapper::default().cap_column(&values);
        assert_eq!(capped[1], None);

        let (all_absent, bounds) = OutlierCapper::default().cap_column(&[None, None]);
        assert!(bounds.is_none());
        assert_eq!(all_absent, vec![None, None]);
    }
}
