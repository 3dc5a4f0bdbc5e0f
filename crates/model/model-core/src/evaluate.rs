//! Hold-out evaluation of regressors.

use std::ops::Range;

use model_spi::{Evaluation, FeatureMatrix, ModelError, Regressor, Result};
use table_spi::Table;

use crate::metrics::{mae, mse, r2};

/// Chronological split of `n` rows: the first rows train, the last
/// `ceil(n * test_ratio)` rows test.
pub fn train_test_split(n: usize, test_ratio: f64) -> Result<(Range<usize>, Range<usize>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ModelError::InvalidParameter {
            name: "test_ratio".to_string(),
            reason: "must be between 0 and 1 (exclusive)".to_string(),
        });
    }

    let test = ((n as f64) * test_ratio).ceil() as usize;
    if n < 2 || test >= n {
        return Err(ModelError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let split = n - test;
    Ok((0..split, split..n))
}

/// Feature matrix with rows ordered by `date_column`, oldest first.
///
/// Order exports are not guaranteed to be sorted; the hold-out rows of
/// [`train_test_split`] are only the latest orders once the rows are.
pub fn chronological_features(
    table: &Table,
    date_column: &str,
    target: &str,
    exclude: &[&str],
) -> Result<(FeatureMatrix, Vec<f64>)> {
    let sorted = table.sort_by_date(date_column)?;
    FeatureMatrix::from_table(&sorted, target, exclude)
}

/// Fit `model` on the training rows and score it on the test rows.
pub fn evaluate_regressor<R: Regressor + ?Sized>(
    model: &mut R,
    x: &FeatureMatrix,
    y: &[f64],
    test_ratio: f64,
) -> Result<Evaluation> {
    if x.n_rows() != y.len() {
        return Err(ModelError::DimensionMismatch {
            expected: x.n_rows(),
            actual: y.len(),
        });
    }

    let (train, test) = train_test_split(y.len(), test_ratio)?;
    model.fit(&x.slice(train.clone()), &y[train.clone()])?;

    let predicted = model.predict(&x.slice(test.clone()))?;
    let actual = &y[test.clone()];
    let evaluation = Evaluation {
        mse: mse(actual, &predicted),
        mae: mae(actual, &predicted),
        r2: r2(actual, &predicted),
    };

    tracing::info!(
        train = train.len(),
        test = test.len(),
        mse = evaluation.mse,
        mae = evaluation.mae,
        r2 = evaluation.r2,
        "evaluated regressor"
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::LinearRegression;
    use chrono::NaiveDate;
    use table_spi::{Column, ColumnData, TableError};

    #[test]
    fn test_split_is_chronological() {
        let (train, test) = train_test_split(10, 0.2).unwrap();
        assert_eq!(train, 0..8);
        assert_eq!(test, 8..10);

        let (train, test) = train_test_split(7, 0.2).unwrap();
        assert_eq!(train, 0..5);
        assert_eq!(test, 5..7);
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        assert!(train_test_split(10, 0.0).is_err());
        assert!(train_test_split(10, 1.0).is_err());
        assert!(train_test_split(10, f64::NAN).is_err());
    }

    #[test]
    fn test_split_too_few_rows() {
        assert!(matches!(
            train_test_split(1, 0.5),
            Err(ModelError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_evaluate_perfect_model() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..20).map(|i| 1.0 + 0.5 * i as f64).collect();
        let x = FeatureMatrix::new(vec!["t".to_string()], rows).unwrap();

        let mut model = LinearRegression::new(0.0).unwrap();
        let evaluation = evaluate_regressor(&mut model, &x, &y, 0.25).unwrap();
        assert!(evaluation.mse < 1e-12);
        assert!(evaluation.mae < 1e-6);
        assert!((evaluation.r2 - 1.0).abs() < 1e-9);
        assert!(model.is_fitted());
    }

    #[test]
    fn test_chronological_features_orders_rows() {
        let date = |m, d| NaiveDate::from_ymd_opt(2023, m, d);
        let table = Table::from_columns(vec![
            Column::new(
                "order_date",
                ColumnData::Date(vec![date(3, 1), date(1, 1), date(2, 1), date(1, 15)]),
            ),
            Column::new("item_price", vec![30.0, 10.0, 20.0, 15.0]),
            Column::new("ord_qty", vec![3.0, 1.0, 2.0, 1.5]),
        ])
        .unwrap();

        let (x, y) = chronological_features(&table, "order_date", "ord_qty", &[]).unwrap();
        assert_eq!(x.names(), ["item_price".to_string()]);
        assert_eq!(y, vec![1.0, 1.5, 2.0, 3.0]);

        // The hold-out row is the latest order
        let (_, test) = train_test_split(y.len(), 0.2).unwrap();
        assert_eq!(x.slice(test).rows(), [vec![30.0]]);
    }

    #[test]
    fn test_chronological_features_needs_date_column() {
        let table = Table::from_columns(vec![Column::new("ord_qty", vec![1.0, 2.0])]).unwrap();
        assert!(matches!(
            chronological_features(&table, "ord_qty", "ord_qty", &[]),
            Err(ModelError::Table(TableError::TypeMismatch { .. }))
        ));
    }
}
