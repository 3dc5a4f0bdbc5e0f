//! Order data cleaner
//!
//! Turns a raw order table into one that later stages can rely on:
//!
//! 1. the date column is parsed into a [`ColumnData::Date`] column
//! 2. rows with a non-positive or absent price or quantity are removed
//! 3. numeric columns are IQR-capped

use prep_api::{CleanConfig, InvalidDatePolicy};
use prep_spi::{PrepError, Result, TableStep};
use table_core::parse_date;
use table_spi::{Column, ColumnData, Table};

use crate::outlier::OutlierCapper;

/// Cleans raw order tables according to a [`CleanConfig`].
#[derive(Debug, Clone)]
pub struct DataCleaner {
    config: CleanConfig,
    capper: OutlierCapper,
}

impl DataCleaner {
    pub fn new(config: CleanConfig) -> Result<Self> {
        config.validate()?;
        let capper = OutlierCapper::new(config.iqr_multiplier)?;
        Ok(Self { config, capper })
    }

    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Clean a table. The input is left untouched.
    pub fn clean(&self, table: &Table) -> Result<Table> {
        for required in [
            &self.config.date_column,
            &self.config.price_column,
            &self.config.qty_column,
        ] {
            table.column(required)?;
        }

        if table.is_empty() {
            return Ok(table.clone());
        }

        let mut parsed = table.clone();
        let dates = self.parse_dates(table)?;
        parsed.upsert_column(Column::new(
            self.config.date_column.as_str(),
            ColumnData::Date(dates),
        ))?;

        let mask = self.keep_mask(&parsed)?;
        let mut filtered = parsed.filter_rows(&mask)?;
        let capped = self.cap_outliers(&mut filtered)?;

        tracing::debug!(
            rows_in = table.height(),
            rows_out = filtered.height(),
            capped = ?capped,
            "cleaned order table"
        );
        Ok(filtered)
    }

    fn parse_dates(&self, table: &Table) -> Result<Vec<Option<chrono::NaiveDate>>> {
        let column = &self.config.date_column;
        match table.data(column)? {
            ColumnData::Date(values) => Ok(values.clone()),
            ColumnData::Text(values) => Ok(values
                .iter()
                .map(|cell| {
                    cell.as_deref()
                        .and_then(|raw| parse_date(raw, &self.config.date_formats))
                })
                .collect()),
            other => Err(PrepError::InvalidDateColumn {
                column: column.clone(),
                reason: format!("cannot parse dates from a {} column", other.data_type()),
            }),
        }
    }

    /// Rows to keep: positive price and quantity, and a date unless the
    /// policy retains unparseable ones.
    fn keep_mask(&self, table: &Table) -> Result<Vec<bool>> {
        let price = self.positive_values(table, &self.config.price_column)?;
        let qty = self.positive_values(table, &self.config.qty_column)?;

        let mut mask: Vec<bool> = price.iter().zip(&qty).map(|(p, q)| *p && *q).collect();

        if self.config.invalid_dates == InvalidDatePolicy::Drop {
            if let ColumnData::Date(dates) = table.data(&self.config.date_column)? {
                for (keep, date) in mask.iter_mut().zip(dates) {
                    *keep = *keep && date.is_some();
                }
            }
        }
        Ok(mask)
    }

    fn positive_values(&self, table: &Table, name: &str) -> Result<Vec<bool>> {
        let data = table.data(name)?;
        let values = data
            .numeric_values()
            .ok_or_else(|| PrepError::InvalidColumnType {
                column: name.to_string(),
                expected: "numeric".to_string(),
                actual: data.data_type().to_string(),
            })?;
        Ok(values
            .iter()
            .map(|v| matches!(v, Some(x) if *x > 0.0))
            .collect())
    }

    /// Cap every numeric column outside `cap_exclude`. Returns the names of
    /// the capped columns.
    fn cap_outliers(&self, table: &mut Table) -> Result<Vec<String>> {
        let targets: Vec<String> = table
            .columns()
            .iter()
            .filter(|c| c.data_type().is_numeric())
            .filter(|c| !self.config.cap_exclude.iter().any(|x| x == c.name()))
            .map(|c| c.name().to_string())
            .collect();

        for name in &targets {
            let values = match table.data(name)?.numeric_values() {
                Some(values) => values,
                None => continue,
            };
            let (capped, bounds) = self.capper.cap_column(&values);
            if let Some(bounds) = bounds {
                tracing::debug!(
                    column = %name,
                    lower = bounds.lower,
                    upper = bounds.upper,
                    "capping outliers"
                );
            }
            table.upsert_column(Column::new(name.as_str(), ColumnData::Float(capped)))?;
        }
        Ok(targets)
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self {
            config: CleanConfig::default(),
            capper: OutlierCapper::default(),
        }
    }
}

impl TableStep for DataCleaner {
    fn apply(&self, table: &Table) -> Result<Table> {
        self.clean(table)
    }

    fn name(&self) -> &str {
        "clean"
    }
}

/// Clean a table with the default configuration.
pub fn clean(table: &Table) -> Result<Table> {
    DataCleaner::default().clean(table)
}
