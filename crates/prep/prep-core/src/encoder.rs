//! One-hot encoding of categorical columns
//!
//! The encoder is fitted once, on the training table, and can then be
//! applied to any table with the same columns. Fitted state serializes
//! with serde so it can be stored next to a trained model.

use std::collections::{BTreeMap, BTreeSet};

use prep_api::{EncoderConfig, UnknownCategoryPolicy};
use prep_spi::{PrepError, Result};
use serde::{Deserialize, Serialize};
use table_spi::{Column, ColumnData, DataType, Table};

/// Categories learned for one column, in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub name: String,
    pub categories: Vec<String>,
}

impl EncodedColumn {
    /// Output column names, one per category.
    pub fn indicator_names(&self) -> impl Iterator<Item = String> + '_ {
        self.categories
            .iter()
            .map(move |c| format!("{}_{}", self.name, c))
    }
}

/// One-hot encoder for text columns
///
/// Each fitted column is replaced by one Int 0/1 column per category named
/// `<column>_<category>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<EncodedColumn>,
    unknown: UnknownCategoryPolicy,
}

impl OneHotEncoder {
    /// Learn categories of every text column not in `exclude`.
    pub fn fit(table: &Table, exclude: &[&str]) -> Result<Self> {
        let columns = table
            .columns()
            .iter()
            .filter(|c| c.data_type().is_categorical())
            .filter(|c| !exclude.iter().any(|x| *x == c.name()))
            .map(|c| EncodedColumn {
                name: c.name().to_string(),
                categories: categories_of(c.values()),
            })
            .collect();

        Ok(Self {
            columns,
            unknown: UnknownCategoryPolicy::default(),
        })
    }

    /// Fit with exclusions and policies from an [`EncoderConfig`].
    pub fn fit_with_config(table: &Table, config: &EncoderConfig) -> Result<Self> {
        let exclude: Vec<&str> = config.exclude.iter().map(String::as_str).collect();
        let encoder = Self::fit(table, &exclude)?.with_unknown(config.unknown);
        if config.strict && encoder.columns.is_empty() {
            return Err(PrepError::EmptyColumnSet);
        }
        Ok(encoder)
    }

    pub fn with_unknown(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.unknown = policy;
        self
    }

    pub fn columns(&self) -> &[EncodedColumn] {
        &self.columns
    }

    /// True when fitting found nothing to encode.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Names of every generated indicator column, in output order.
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|c| c.indicator_names())
            .collect()
    }

    /// Replace every fitted column with its indicator columns.
    pub fn transform(&self, table: &Table) -> Result<Table> {
        let mut encoded = table.clone();

        for fitted in &self.columns {
            let removed = encoded.drop_column(&fitted.name)?;
            let values = match removed.values() {
                ColumnData::Text(values) => values,
                other => {
                    return Err(PrepError::InvalidColumnType {
                        column: fitted.name.clone(),
                        expected: DataType::Text.to_string(),
                        actual: other.data_type().to_string(),
                    })
                }
            };

            let index: BTreeMap<&str, usize> = fitted
                .categories
                .iter()
                .enumerate()
                .map(|(i, c)| (c.as_str(), i))
                .collect();

            let mut indicators = vec![vec![Some(0_i64); values.len()]; fitted.categories.len()];
            for (row, value) in values.iter().enumerate() {
                let Some(value) = value.as_deref() else {
                    continue;
                };
                match index.get(value) {
                    Some(&i) => indicators[i][row] = Some(1),
                    None if self.unknown == UnknownCategoryPolicy::Error => {
                        return Err(PrepError::UnknownCategory {
                            column: fitted.name.clone(),
                            value: value.to_string(),
                        })
                    }
                    None => {}
                }
            }

            for (name, values) in fitted.indicator_names().zip(indicators) {
                encoded.upsert_column(Column::new(name, ColumnData::Int(values)))?;
            }
        }

        tracing::debug!(
            encoded = self.columns.len(),
            generated = encoded.width() + self.columns.len() - table.width(),
            "one-hot encoded table"
        );
        Ok(encoded)
    }
}

/// Fit and transform in one go with the default unknown-category policy.
pub fn encode(table: &Table, exclude: &[&str]) -> Result<Table> {
    OneHotEncoder::fit(table, exclude)?.transform(table)
}

fn categories_of(values: &ColumnData) -> Vec<String> {
    match values {
        ColumnData::Text(values) => values
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> Table {
        Table::from_columns(vec![
            Column::new("order_date", vec!["2023-06-18", "2023-06-19", "2023-06-20"]),
            Column::new("sales_chan_name", vec!["online", "offline", "online"]),
            Column::new("ord_qty", vec![5.0, 3.0, 2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_fit_learns_sorted_categories() {
        let encoder = OneHotEncoder::fit(&orders(), &["order_date"]).unwrap();
        assert_eq!(encoder.columns().len(), 1);
        assert_eq!(encoder.columns()[0].categories, vec!["offline", "online"]);
        assert_eq!(
            encoder.feature_names(),
            vec!["sales_chan_name_offline", "sales_chan_name_online"]
        );
    }

    #[test]
    fn test_transform_partitions_rows() {
        let encoded = encode(&orders(), &["order_date"]).unwrap();

        assert!(!encoded.has_column("sales_chan_name"));
        assert_eq!(
            encoded.column_names(),
            vec![
                "order_date",
                "ord_qty",
                "sales_chan_name_offline",
                "sales_chan_name_online"
            ]
        );
        assert_eq!(
            encoded.data("sales_chan_name_online").unwrap(),
            &ColumnData::from(vec![1_i64, 0, 1])
        );
        assert_eq!(
            encoded.data("sales_chan_name_offline").unwrap(),
            &ColumnData::from(vec![0_i64, 1, 0])
        );
    }

    #[test]
    fn test_single_category_column() {
        let table = Table::from_columns(vec![Column::new("region", vec!["north", "north"])]).unwrap();
        let encoded = encode(&table, &[]).unwrap();
        assert_eq!(encoded.column_names(), vec!["region_north"]);
        assert_eq!(
            encoded.data("region_north").unwrap(),
            &ColumnData::from(vec![1_i64, 1])
        );
    }

    #[test]
    fn test_absent_cell_gives_zero_row() {
        let table = Table::from_columns(vec![Column::new(
            "chan",
            ColumnData::Text(vec![Some("a".to_string()), None]),
        )])
        .unwrap();
        let encoded = encode(&table, &[]).unwrap();
        assert_eq!(encoded.column_names(), vec!["chan_a"]);
        assert_eq!(encoded.data("chan_a").unwrap(), &ColumnData::from(vec![1_i64, 0]));
    }

    #[test]
    fn test_unknown_category_policies() {
        let encoder = OneHotEncoder::fit(&orders(), &["order_date"]).unwrap();
        let unseen = Table::from_columns(vec![
            Column::new("order_date", vec!["2023-07-01"]),
            Column::new("sales_chan_name", vec!["wholesale"]),
            Column::new("ord_qty", vec![1.0]),
        ])
        .unwrap();

        let ignored = encoder.transform(&unseen).unwrap();
        assert_eq!(
            ignored.data("sales_chan_name_online").unwrap(),
            &ColumnData::from(vec![0_i64])
        );

        let strict = encoder.with_unknown(UnknownCategoryPolicy::Error);
        assert_eq!(
            strict.transform(&unseen),
            Err(PrepError::UnknownCategory {
                column: "sales_chan_name".to_string(),
                value: "wholesale".to_string(),
            })
        );
    }

    #[test]
    fn test_fitted_column_missing_at_transform() {
        let encoder = OneHotEncoder::fit(&orders(), &["order_date"]).unwrap();
        let table = Table::from_columns(vec![Column::new("ord_qty", vec![1.0])]).unwrap();
        assert_eq!(
            encoder.transform(&table),
            Err(PrepError::MissingColumn("sales_chan_name".to_string()))
        );
    }

    #[test]
    fn test_no_categorical_columns() {
        let table = Table::from_columns(vec![Column::new("ord_qty", vec![1.0, 2.0])]).unwrap();
        assert_eq!(encode(&table, &[]).unwrap(), table);

        let strict = EncoderConfig::default().strict(true);
        assert_eq!(
            OneHotEncoder::fit_with_config(&table, &strict),
            Err(PrepError::EmptyColumnSet)
        );
    }

    #[test]
    fn test_column_set_is_deterministic() {
        let a = encode(&orders(), &["order_date"]).unwrap();
        let b = encode(&orders(), &["order_date"]).unwrap();
        assert_eq!(a.column_names(), b.column_names());
    }

    #[test]
    fn test_encoder_state_roundtrips_through_json() {
        let encoder = OneHotEncoder::fit(&orders(), &["order_date"])
            .unwrap()
            .with_unknown(UnknownCategoryPolicy::Error);
        let json = serde_json::to_string(&encoder).unwrap();
        let restored: OneHotEncoder = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, encoder);
    }
}
