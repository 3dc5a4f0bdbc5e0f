//! Integration tests for the model crates
//!
//! Train on prepared order tables through the facade API.

use chrono::{Datelike, Duration, NaiveDate};
use model_facade::{
    chronological_features, evaluate_regressor, future_periods, resample, train_test_split,
    Aggregation, Arima, Evaluation, FeatureMatrix, Forecaster, Frequency, LinearRegression,
    ModelError, Regressor,
};
use prep_facade::{Column, ColumnData, FixedHolidayCalendar, PrepConfig, PrepPipeline, Table};

/// Daily orders over two channels with a weekly pattern.
fn raw_orders(days: i64) -> Table {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let mut dates = Vec::new();
    let mut prices = Vec::new();
    let mut qty = Vec::new();
    let mut channels = Vec::new();
    for i in 0..days {
        let date = start + Duration::days(i);
        for (channel, base) in [("online", 20.0), ("offline", 10.0)] {
            dates.push(date.format("%Y-%m-%d").to_string());
            prices.push(100.0 + (i % 7) as f64);
            qty.push(base + (i % 7) as f64);
            channels.push(channel.to_string());
        }
    }

    Table::from_columns(vec![
        Column::new("order_date", ColumnData::Text(dates.into_iter().map(Some).collect())),
        Column::new("item_price", prices),
        Column::new("ord_qty", qty),
        Column::new(
            "sales_chan_name",
            ColumnData::Text(channels.into_iter().map(Some).collect()),
        ),
    ])
    .unwrap()
}

fn prepared(days: i64) -> prep_facade::PrepOutput {
    PrepPipeline::new(
        PrepConfig::default(),
        Box::new(FixedHolidayCalendar::from_dates(Vec::<NaiveDate>::new())),
    )
    .unwrap()
    .run(&raw_orders(days))
    .unwrap()
}

#[test]
fn test_train_regressor_on_prepared_table() {
    let output = prepared(120);
    let (x, y) = FeatureMatrix::from_table(&output.encoded, "ord_qty", &[]).unwrap();
    assert_eq!(x.n_rows(), 240);
    assert!(x.names().iter().any(|n| n == "sales_chan_name_online"));
    assert!(!x.names().iter().any(|n| n == "ord_qty"));

    let mut model = LinearRegression::default();
    let evaluation = evaluate_regressor(&mut model, &x, &y, 0.2).unwrap();
    // Quantity is a linear function of channel and price here
    assert!(evaluation.r2 > 0.95, "{:?}", evaluation);

    let json = serde_json::to_string(&evaluation).unwrap();
    let restored: Evaluation = serde_json::from_str(&json).unwrap();
    assert!((restored.mse - evaluation.mse).abs() <= 1e-12 * evaluation.mse.abs().max(1.0));
    assert!((restored.r2 - evaluation.r2).abs() < 1e-12);
}

#[test]
fn test_hold_out_rows_are_latest_orders() {
    // Exports are not sorted by date
    let dates = ["2023-03-01", "2023-01-01", "2023-02-01", "2022-12-01", "2023-01-15"];
    let raw = Table::from_columns(vec![
        Column::new("order_date", dates.to_vec()),
        Column::new("item_price", vec![100.0; 5]),
        Column::new("ord_qty", vec![10.0; 5]),
        Column::new("sales_chan_name", vec!["online"; 5]),
    ])
    .unwrap();

    let pipeline = PrepPipeline::new(
        PrepConfig::default(),
        Box::new(FixedHolidayCalendar::from_dates(Vec::<NaiveDate>::new())),
    )
    .unwrap();
    let output = pipeline.run(&raw).unwrap();
    let (x, _) =
        chronological_features(&output.encoded, pipeline.date_column(), "ord_qty", &[]).unwrap();

    let position = |name: &str| x.names().iter().position(|n| n == name).unwrap();
    let (year, month, day) = (position("year"), position("month"), position("day"));
    let ymd = |row: &Vec<f64>| (row[year], row[month], row[day]);

    let (_, test) = train_test_split(x.n_rows(), 0.2).unwrap();
    let held_out: Vec<_> = x.slice(test).rows().iter().map(|r| ymd(r)).collect();
    assert_eq!(held_out, vec![(2023.0, 3.0, 1.0)]);
    assert_eq!(ymd(&x.rows()[0]), (2022.0, 12.0, 1.0));
}

#[test]
fn test_monthly_series_has_no_gaps() {
    // January to April 2022, then drop every February order
    let output = prepared(120);
    let mask: Vec<bool> = match output.cleaned.data("order_date").unwrap() {
        ColumnData::Date(values) => values
            .iter()
            .map(|d| d.map_or(true, |d| d.month() != 2))
            .collect(),
        other => panic!("unexpected {}", other.data_type()),
    };
    let sparse = output.cleaned.filter_rows(&mask).unwrap();

    let series = resample(
        &sparse,
        "order_date",
        "ord_qty",
        Frequency::Monthly,
        Aggregation::Sum,
    )
    .unwrap();
    let months: Vec<NaiveDate> = series.iter().map(|(d, _)| *d).collect();
    assert_eq!(
        months,
        (1..=4)
            .map(|m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap())
            .collect::<Vec<_>>()
    );
    assert_eq!(series[1].1, 0.0);
    assert_eq!(series.iter().filter(|(_, v)| *v > 0.0).count(), 3);
}

#[test]
fn test_regressor_trait_object() {
    let output = prepared(30);
    let (x, y) = FeatureMatrix::from_table(&output.encoded, "ord_qty", &[]).unwrap();

    let mut model: Box<dyn Regressor> = Box::new(LinearRegression::default());
    model.fit(&x, &y).unwrap();
    assert_eq!(model.predict(&x).unwrap().len(), y.len());
}

#[test]
fn test_forecast_monthly_demand() {
    let output = prepared(400);
    let series = resample(
        &output.cleaned,
        "order_date",
        "ord_qty",
        Frequency::Monthly,
        Aggregation::Sum,
    )
    .unwrap();
    assert_eq!(series.len(), 14);
    assert_eq!(series[0].0, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());

    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let mut model = Arima::new(1, 0, 0).unwrap();
    model.fit(&values).unwrap();
    let forecast = model.forecast(3).unwrap();
    assert_eq!(forecast.len(), 3);
    assert!(forecast.iter().all(|v| v.is_finite() && *v > 0.0));

    let periods = future_periods(series[series.len() - 1].0, Frequency::Monthly, 3);
    assert_eq!(periods[0], NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
}

#[test]
fn test_short_series_is_rejected() {
    let output = prepared(60);
    let series = resample(
        &output.cleaned,
        "order_date",
        "ord_qty",
        Frequency::Monthly,
        Aggregation::Sum,
    )
    .unwrap();
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();

    let mut model = Arima::default();
    assert!(matches!(
        model.fit(&values),
        Err(ModelError::InsufficientData { .. })
    ));
}
