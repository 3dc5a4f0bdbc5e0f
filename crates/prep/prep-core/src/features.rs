//! Calendar feature derivation
//!
//! Appends eight columns to a table with a parsed date column:
//! `year`, `month`, `day`, `weekday`, `season`, `is_holiday`, `month_phase`
//! and `is_promo`.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use prep_api::FeatureConfig;
use prep_spi::{feature_columns, HolidayCalendar, PrepError, Result, TableStep};
use rayon::prelude::*;
use table_spi::{Column, ColumnData, Table};

use crate::calendar::{PromoCalendar, RowFeatures};

/// Derives calendar features using an injected holiday calendar.
pub struct FeatureDeriver {
    calendar: Box<dyn HolidayCalendar>,
    config: FeatureConfig,
    promos: PromoCalendar,
}

impl FeatureDeriver {
    pub fn new(calendar: Box<dyn HolidayCalendar>) -> Self {
        let config = FeatureConfig::default();
        let promos = PromoCalendar::new(&config.promo_days);
        Self {
            calendar,
            config,
            promos,
        }
    }

    pub fn with_config(mut self, config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        self.promos = PromoCalendar::new(&config.promo_days);
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn calendar(&self) -> &dyn HolidayCalendar {
        self.calendar.as_ref()
    }

    /// Derive features from `date_column`. Existing feature columns with
    /// the same names are replaced.
    pub fn derive(&self, table: &Table, date_column: &str) -> Result<Table> {
        derive_with(table, date_column, self.calendar.as_ref(), &self.promos)
    }
}

impl std::fmt::Debug for FeatureDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureDeriver")
            .field("region", &self.calendar.region())
            .field("config", &self.config)
            .finish()
    }
}

impl TableStep for FeatureDeriver {
    fn apply(&self, table: &Table) -> Result<Table> {
        self.derive(table, &self.config.date_column)
    }

    fn name(&self) -> &str {
        "features"
    }
}

/// Derive features with the default promotion days.
pub fn derive_features(
    table: &Table,
    date_column: &str,
    calendar: &dyn HolidayCalendar,
) -> Result<Table> {
    derive_with(table, date_column, calendar, &PromoCalendar::default())
}

fn derive_with(
    table: &Table,
    date_column: &str,
    calendar: &dyn HolidayCalendar,
    promos: &PromoCalendar,
) -> Result<Table> {
    let dates = checked_dates(table, date_column)?;

    // One calendar lookup for every year in the table
    let years: BTreeSet<i32> = dates.iter().map(|d| d.year()).collect();
    let holidays = calendar.holidays_for(&years);

    let rows: Vec<RowFeatures> = dates
        .par_iter()
        .map(|&date| RowFeatures::derive(date, &holidays, promos))
        .collect();

    let mut derived = table.clone();
    for column in feature_columns_of(&rows) {
        derived.upsert_column(column)?;
    }

    tracing::debug!(
        rows = rows.len(),
        years = ?years,
        holidays = holidays.len(),
        region = calendar.region(),
        "derived calendar features"
    );
    Ok(derived)
}

/// The date column as plain dates. This stage does not parse.
fn checked_dates(table: &Table, date_column: &str) -> Result<Vec<NaiveDate>> {
    let data = table.data(date_column)?;
    if table.is_empty() {
        return Err(PrepError::EmptyTable);
    }

    let values = match data {
        ColumnData::Date(values) => values,
        other => {
            return Err(PrepError::InvalidDateColumn {
                column: date_column.to_string(),
                reason: format!("expected a date column, found {}", other.data_type()),
            })
        }
    };

    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| PrepError::InvalidDateColumn {
                column: date_column.to_string(),
                reason: format!("row {} has no date", row),
            })
        })
        .collect()
}

fn feature_columns_of(rows: &[RowFeatures]) -> Vec<Column> {
    let int = |f: fn(&RowFeatures) -> i64| {
        ColumnData::Int(rows.iter().map(|r| Some(f(r))).collect())
    };
    let boolean = |f: fn(&RowFeatures) -> bool| {
        ColumnData::Bool(rows.iter().map(|r| Some(f(r))).collect())
    };
    let text = |f: fn(&RowFeatures) -> &'static str| {
        ColumnData::Text(rows.iter().map(|r| Some(f(r).to_string())).collect())
    };

    vec![
        Column::new(feature_columns::YEAR, int(|r| r.year as i64)),
        Column::new(feature_columns::MONTH, int(|r| r.month as i64)),
        Column::new(feature_columns::DAY, int(|r| r.day as i64)),
        Column::new(feature_columns::WEEKDAY, int(|r| r.weekday as i64)),
        Column::new(feature_columns::SEASON, text(|r| r.season.label())),
        Column::new(feature_columns::IS_HOLIDAY, boolean(|r| r.is_holiday)),
        Column::new(feature_columns::MONTH_PHASE, text(|r| r.month_phase.label())),
        Column::new(feature_columns::IS_PROMO, boolean(|r| r.is_promo)),
    ]
}
