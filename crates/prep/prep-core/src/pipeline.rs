//! Clean, derive and encode in one run.

use prep_api::{EncoderConfig, PrepConfig};
use prep_spi::{HolidayCalendar, Result, TableStep};
use table_spi::Table;

use crate::cleaner::DataCleaner;
use crate::encoder::OneHotEncoder;
use crate::features::FeatureDeriver;

/// Every intermediate table of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepOutput {
    /// After date parsing, filtering and capping
    pub cleaned: Table,
    /// Cleaned table with calendar features
    pub features: Table,
    /// Feature table with categorical columns one-hot encoded
    pub encoded: Table,
    /// Encoder fitted on the feature table
    pub encoder: OneHotEncoder,
}

/// Composable preparation pipeline
///
/// Runs the cleaner and the feature deriver, then fits and applies the
/// encoder on the feature table.
pub struct PrepPipeline {
    cleaner: DataCleaner,
    deriver: FeatureDeriver,
    encoder: EncoderConfig,
}

impl PrepPipeline {
    /// Cleaner and feature deriver built from `config`.
    pub fn new(config: PrepConfig, calendar: Box<dyn HolidayCalendar>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cleaner: DataCleaner::new(config.clean)?,
            deriver: FeatureDeriver::new(calendar).with_config(config.features)?,
            encoder: config.encoder,
        })
    }

    /// Parsed date column the features are derived from.
    pub fn date_column(&self) -> &str {
        &self.deriver.config().date_column
    }

    pub fn step_names(&self) -> Vec<&str> {
        vec![self.cleaner.name(), self.deriver.name(), "encode"]
    }

    pub fn run(&self, table: &Table) -> Result<PrepOutput> {
        let cleaned = run_step(&self.cleaner, table)?;
        let features = run_step(&self.deriver, &cleaned)?;

        tracing::info!(step = "encode", rows = features.height(), "running step");
        let encoder = OneHotEncoder::fit_with_config(&features, &self.encoder)?;
        let encoded = encoder.transform(&features)?;
        tracing::info!(
            rows = encoded.height(),
            columns = encoded.width(),
            "encoded features"
        );

        Ok(PrepOutput {
            cleaned,
            features,
            encoded,
            encoder,
        })
    }
}

fn run_step(step: &dyn TableStep, table: &Table) -> Result<Table> {
    tracing::info!(step = step.name(), rows = table.height(), "running step");
    step.apply(table)
}

impl std::fmt::Debug for PrepPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrepPipeline")
            .field("cleaner", &self.cleaner)
            .field("deriver", &self.deriver)
            .field("encoder", &self.encoder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::FixedHolidayCalendar;
    use chrono::NaiveDate;
    use prep_spi::PrepError;
    use table_spi::{Column, ColumnData};

    fn pipeline() -> PrepPipeline {
        PrepPipeline::new(
            PrepConfig::default(),
            Box::new(FixedHolidayCalendar::from_dates(Vec::<NaiveDate>::new())),
        )
        .unwrap()
    }

    #[test]
    fn test_step_names() {
        assert_eq!(pipeline().step_names(), vec!["clean", "features", "encode"]);
        assert_eq!(pipeline().date_column(), "order_date");
    }

    #[test]
    fn test_run_keeps_intermediate_tables() {
        let table = Table::from_columns(vec![
            Column::new("order_date", vec!["2023-06-18", "2023-06-19"]),
            Column::new("item_price", vec![10.0, 12.0]),
            Column::new("ord_qty", vec![5.0, 3.0]),
            Column::new("sales_chan_name", vec!["online", "offline"]),
        ])
        .unwrap();

        let output = pipeline().run(&table).unwrap();
        assert_eq!(output.cleaned.width(), 4);
        assert_eq!(output.features.width(), 12);
        assert!(output.features.has_column("season"));
        // season, month_phase and the channel get encoded; order_date is excluded
        assert!(output.encoded.has_column("sales_chan_name_online"));
        assert!(output.encoded.has_column("season_Summer"));
        assert!(output.encoded.has_column("month_phase_Mid"));
        assert!(matches!(
            output.encoded.data("order_date").unwrap(),
            ColumnData::Date(_)
        ));
        assert_eq!(output.encoder.columns().len(), 3);
    }

    #[test]
    fn test_run_all_rows_filtered() {
        let table = Table::from_columns(vec![
            Column::new("order_date", vec!["2023-06-18"]),
            Column::new("item_price", vec![-1.0]),
            Column::new("ord_qty", vec![5.0]),
        ])
        .unwrap();
        assert_eq!(pipeline().run(&table).unwrap_err(), PrepError::EmptyTable);
    }
}
