//! Column type declarations and inference.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use table_spi::{columns, DataType};

/// Date layouts tried in order when parsing a date cell.
pub const DEFAULT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Parse a date cell, also accepting a datetime and keeping its date part.
pub fn parse_date(value: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    for fmt in formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Declared column types. Columns without a declaration are inferred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    types: BTreeMap<String, DataType>,
    #[serde(default = "default_formats")]
    date_formats: Vec<String>,
}

fn default_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect()
}

impl Schema {
    /// Empty schema: every column is inferred.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
            date_formats: default_formats(),
        }
    }

    /// Schema of the raw order dataset.
    ///
    /// `order_date` stays text so the cleaner owns date parsing; the codes
    /// are integers so they are neither capped nor one-hot encoded.
    pub fn orders() -> Self {
        Self::new()
            .with_type(columns::ORDER_DATE, DataType::Text)
            .with_type(columns::ITEM_PRICE, DataType::Float)
            .with_type(columns::ORD_QTY, DataType::Float)
            .with_type(columns::SALES_CHAN_NAME, DataType::Text)
            .with_type(columns::SALES_REGION_CODE, DataType::Int)
            .with_type(columns::ITEM_CODE, DataType::Int)
            .with_type(columns::FIRST_CATE_CODE, DataType::Int)
            .with_type(columns::SECOND_CATE_CODE, DataType::Int)
    }

    /// Declare a column type.
    pub fn with_type(mut self, column: &str, data_type: DataType) -> Self {
        self.types.insert(column.to_string(), data_type);
        self
    }

    /// Replace the date layouts used for Date columns.
    pub fn with_date_formats(mut self, formats: &[&str]) -> Self {
        self.date_formats = formats.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn declared(&self, column: &str) -> Option<DataType> {
        self.types.get(column).copied()
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }
}

/// Infer a column type from its raw cells. Empty cells are ignored.
///
/// Int beats Float beats Bool beats Text; an all-empty column is Text.
pub fn infer_type<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> DataType {
    let present = || cells.clone().map(str::trim).filter(|s| !s.is_empty());

    if present().next().is_none() {
        return DataType::Text;
    }
    if present().all(|s| s.parse::<i64>().is_ok()) {
        return DataType::Int;
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return DataType::Float;
    }
    if present().all(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")) {
        return DataType::Bool;
    }
    DataType::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_int() {
        let cells = ["1", "", "42"];
        assert_eq!(infer_type(cells.iter().copied()), DataType::Int);
    }

    #[test]
    fn test_infer_float() {
        let cells = ["1", "2.5"];
        assert_eq!(infer_type(cells.iter().copied()), DataType::Float);
    }

    #[test]
    fn test_infer_bool_and_text() {
        let bools = ["true", "FALSE"];
        assert_eq!(infer_type(bools.iter().copied()), DataType::Bool);
        let text = ["online", "offline"];
        assert_eq!(infer_type(text.iter().copied()), DataType::Text);
        let empty = ["", " "];
        assert_eq!(infer_type(empty.iter().copied()), DataType::Text);
    }

    #[test]
    fn test_orders_schema() {
        let schema = Schema::orders();
        assert_eq!(schema.declared("ord_qty"), Some(DataType::Float));
        assert_eq!(schema.declared("order_date"), Some(DataType::Text));
        assert_eq!(schema.declared("sales_region_code"), Some(DataType::Int));
        assert_eq!(schema.declared("item_code"), Some(DataType::Int));
        assert_eq!(schema.declared("promo_flag"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let formats = default_formats();
        let expected = NaiveDate::from_ymd_opt(2023, 6, 18);
        assert_eq!(parse_date("2023-06-18", &formats), expected);
        assert_eq!(parse_date("2023/06/18", &formats), expected);
        // Slash dates with a trailing year are month first
        assert_eq!(parse_date("06/18/2023", &formats), expected);
        assert_eq!(parse_date("18/06/2023", &formats), None);
        assert_eq!(parse_date("2023-06-18 13:45:00", &formats), expected);
        assert_eq!(parse_date("not a date", &formats), None);
        assert_eq!(parse_date("2023-02-30", &formats), None);
        assert_eq!(parse_date("", &formats), None);
    }
}
