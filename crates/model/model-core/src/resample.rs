//! Aggregation of order rows into a regular demand series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use model_spi::{ModelError, Result};
use serde::{Deserialize, Serialize};
use table_spi::{ColumnData, Table};

/// Period length of the resampled series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    #[default]
    Monthly,
}

impl Frequency {
    /// First day of the period containing `date`.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => date,
            Frequency::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    /// First day of the period after the one starting at `start`.
    pub fn next_period(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => start.succ_opt(),
            Frequency::Monthly => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
            }
        }
    }
}

/// How values within one period are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
}

/// Aggregate `value_column` by period of `date_column`.
///
/// Returns one `(period start, value)` pair for every period from the first
/// to the last one with data, so the series is evenly spaced. Empty periods
/// are 0.0 under [`Aggregation::Sum`] and linearly interpolated from the
/// neighbouring periods under [`Aggregation::Mean`]. Rows with an absent date
/// or value are skipped.
pub fn resample(
    table: &Table,
    date_column: &str,
    value_column: &str,
    frequency: Frequency,
    aggregation: Aggregation,
) -> Result<Vec<(NaiveDate, f64)>> {
    let dates = match table.data(date_column)? {
        ColumnData::Date(values) => values,
        other => {
            return Err(ModelError::InvalidData(format!(
                "'{}' must be a date column, found {}",
                date_column,
                other.data_type()
            )))
        }
    };
    let values_data = table.data(value_column)?;
    let values = values_data.to_f64().ok_or_else(|| {
        ModelError::InvalidData(format!(
            "'{}' must be numeric, found {}",
            value_column,
            values_data.data_type()
        ))
    })?;

    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for (date, value) in dates.iter().zip(&values) {
        if let (Some(date), Some(value)) = (date, value) {
            let bucket = buckets.entry(frequency.period_start(*date)).or_default();
            bucket.0 += value;
            bucket.1 += 1;
        }
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Ok(Vec::new());
    };

    let mut periods = Vec::new();
    let mut observed = Vec::new();
    let mut current = Some(first);
    while let Some(period) = current.filter(|p| *p <= last) {
        let value = match (buckets.get(&period), aggregation) {
            (Some(&(sum, _)), Aggregation::Sum) => Some(sum),
            (Some(&(sum, count)), Aggregation::Mean) => Some(sum / count as f64),
            (None, Aggregation::Sum) => Some(0.0),
            (None, Aggregation::Mean) => None,
        };
        periods.push(period);
        observed.push(value);
        current = frequency.next_period(period);
    }

    let gaps = observed.iter().filter(|v| v.is_none()).count();
    if gaps > 0 {
        tracing::debug!(periods = periods.len(), gaps, "filled empty periods");
    }

    Ok(periods.into_iter().zip(interpolate(&observed)).collect())
}

/// Linear interpolation of absent values between their present neighbours.
///
/// The first and last values are always present here.
fn interpolate(values: &[Option<f64>]) -> Vec<f64> {
    let mut filled = Vec::with_capacity(values.len());
    let mut previous: Option<(usize, f64)> = None;
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => {
                filled.push(*v);
                previous = Some((i, *v));
            }
            None => {
                let next = values[i..]
                    .iter()
                    .enumerate()
                    .find_map(|(offset, v)| v.map(|v| (i + offset, v)));
                let v = match (previous, next) {
                    (Some((a, va)), Some((b, vb))) => {
                        va + (vb - va) * (i - a) as f64 / (b - a) as f64
                    }
                    (Some((_, v)), None) | (None, Some((_, v))) => v,
                    (None, None) => 0.0,
                };
                filled.push(v);
            }
        }
    }
    filled
}

/// Periods following `last`, for labelling forecasts.
pub fn future_periods(last: NaiveDate, frequency: Frequency, steps: usize) -> Vec<NaiveDate> {
    std::iter::successors(frequency.next_period(last), |d| frequency.next_period(*d))
        .take(steps)
        .collect()
}
