//! Preparation configuration types.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use prep_spi::{PrepError, Result};
use serde::{Deserialize, Serialize};
use table_core::DEFAULT_DATE_FORMATS;
use table_spi::columns;

/// Recurring promotion days as (month, day): 618, Singles' Day and 12.12.
pub const DEFAULT_PROMO_DAYS: [(u32, u32); 3] = [(6, 18), (11, 11), (12, 12)];

/// What the cleaner does with a date it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDatePolicy {
    /// Exclude the row.
    #[default]
    Drop,
    /// Keep the row with an absent date.
    Retain,
}

/// What the encoder does with a category it did not see while fitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// All indicators of that row are 0.
    #[default]
    Ignore,
    /// Fail the transform.
    Error,
}

/// Data cleaner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Column holding the raw order date
    pub date_column: String,
    /// Column that must be strictly positive
    pub price_column: String,
    /// Column that must be strictly positive
    pub qty_column: String,
    /// chrono layouts tried in order
    pub date_formats: Vec<String>,
    /// Handling of unparseable dates
    pub invalid_dates: InvalidDatePolicy,
    /// IQR multiplier for the capping bounds (typically 1.5)
    pub iqr_multiplier: f64,
    /// Numeric columns passed through without capping
    pub cap_exclude: Vec<String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            date_column: columns::ORDER_DATE.to_string(),
            price_column: columns::ITEM_PRICE.to_string(),
            qty_column: columns::ORD_QTY.to_string(),
            date_formats: DEFAULT_DATE_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            invalid_dates: InvalidDatePolicy::Drop,
            iqr_multiplier: 1.5,
            cap_exclude: vec![
                columns::SALES_REGION_CODE.to_string(),
                columns::ITEM_CODE.to_string(),
                columns::FIRST_CATE_CODE.to_string(),
                columns::SECOND_CATE_CODE.to_string(),
            ],
        }
    }
}

impl CleanConfig {
    pub fn builder() -> CleanConfigBuilder {
        CleanConfigBuilder::new()
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(PrepError::InvalidParameter {
                name: "iqr_multiplier".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.date_formats.is_empty() {
            return Err(PrepError::InvalidParameter {
                name: "date_formats".to_string(),
                reason: "at least one format is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for CleanConfig.
#[derive(Debug, Default)]
pub struct CleanConfigBuilder {
    config: CleanConfig,
}

impl CleanConfigBuilder {
    /// Create a new builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_column(mut self, column: &str) -> Self {
        self.config.date_column = column.to_string();
        self
    }

    pub fn price_column(mut self, column: &str) -> Self {
        self.config.price_column = column.to_string();
        self
    }

    pub fn qty_column(mut self, column: &str) -> Self {
        self.config.qty_column = column.to_string();
        self
    }

    pub fn date_formats(mut self, formats: &[&str]) -> Self {
        self.config.date_formats = formats.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn invalid_dates(mut self, policy: InvalidDatePolicy) -> Self {
        self.config.invalid_dates = policy;
        self
    }

    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.config.iqr_multiplier = multiplier;
        self
    }

    pub fn cap_exclude(mut self, columns: &[&str]) -> Self {
        self.config.cap_exclude = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<CleanConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Feature deriver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Parsed date column the features are derived from
    pub date_column: String,
    /// Region code handed to the holiday calendar
    pub holiday_region: String,
    /// (month, day) pairs flagged as promotion days every year
    pub promo_days: Vec<(u32, u32)>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            date_column: columns::ORDER_DATE.to_string(),
            holiday_region: "CN".to_string(),
            promo_days: DEFAULT_PROMO_DAYS.to_vec(),
        }
    }
}

impl FeatureConfig {
    pub fn with_date_column(mut self, column: &str) -> Self {
        self.date_column = column.to_string();
        self
    }

    pub fn with_promo_days(mut self, days: &[(u32, u32)]) -> Self {
        self.promo_days = days.to_vec();
        self
    }

    /// Check that every promotion day is a plausible calendar day.
    pub fn validate(&self) -> Result<()> {
        for &(month, day) in &self.promo_days {
            if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                return Err(PrepError::InvalidParameter {
                    name: "promo_days".to_string(),
                    reason: format!("({}, {}) is not a calendar day", month, day),
                });
            }
        }
        Ok(())
    }
}

/// Categorical encoder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Text columns that are never expanded
    pub exclude: Vec<String>,
    /// Handling of categories unseen while fitting
    pub unknown: UnknownCategoryPolicy,
    /// Fail with `EmptyColumnSet` instead of passing the table through
    pub strict: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            exclude: vec![columns::ORDER_DATE.to_string()],
            unknown: UnknownCategoryPolicy::Ignore,
            strict: false,
        }
    }
}

impl EncoderConfig {
    pub fn with_exclude(mut self, columns: &[&str]) -> Self {
        self.exclude = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_unknown(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.unknown = policy;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Configuration of the whole preparation pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub clean: CleanConfig,
    pub features: FeatureConfig,
    pub encoder: EncoderConfig,
}

impl PrepConfig {
    /// Load from a JSON file. Missing sections and fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PrepError::Config(format!("{}: {}", path.display(), e)))?;
        let config: PrepConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| PrepError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.clean.validate()?;
        self.features.validate()
    }
}
