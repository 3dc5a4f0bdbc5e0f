//! Integration tests for the table crates
//!
//! Load, describe and persist order tables through the facade API.

use std::io::Write;

use table_facade::{
    columns, ColumnData, CsvTableSink, CsvTableSource, DataType, Schema, Table, TableError,
    TableSink, TableSource,
};

const RAW_ORDERS: &str = "\
order_date,sales_region_code,item_code,first_cate_code,second_cate_code,sales_chan_name,item_price,ord_qty
2015-09-01,104,22069,307,403,offline,1114.0,19
2015-09-01,104,20028,301,405,offline,1012.0,12
2015-09-02,104,21183,307,403,online,428.0,109
2015-09-02,104,20448,308,404,offline,-3.0,3
not-a-date,104,21565,307,403,offline,2143.0,2
";

fn raw_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(RAW_ORDERS.as_bytes()).unwrap();
    file
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_raw_orders_with_order_schema() {
    let file = raw_file();
    let table = CsvTableSource::new(file.path())
        .with_schema(Schema::orders())
        .load()
        .unwrap();

    assert_eq!(table.height(), 5);
    assert_eq!(table.width(), 8);
    assert_eq!(table.column(columns::ORDER_DATE).unwrap().data_type(), DataType::Text);
    assert_eq!(table.column(columns::ORD_QTY).unwrap().data_type(), DataType::Float);
    assert_eq!(table.column(columns::SALES_REGION_CODE).unwrap().data_type(), DataType::Int);
    assert_eq!(table.column(columns::ITEM_CODE).unwrap().data_type(), DataType::Int);
}

#[test]
fn test_load_missing_source() {
    let result = CsvTableSource::new("data/raw/missing.csv").load();
    match result {
        Err(e @ TableError::SourceUnavailable { .. }) => {
            assert!(e.to_string().contains("data/raw/missing.csv"));
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
}

// ============================================================================
// Describe
// ============================================================================

#[test]
fn test_describe_raw_orders() {
    let file = raw_file();
    let table = CsvTableSource::new(file.path())
        .with_schema(Schema::orders())
        .load()
        .unwrap();

    let summaries = table.describe();
    let qty = summaries.iter().find(|s| s.name == columns::ORD_QTY).unwrap();
    assert_eq!(qty.count, 5);
    assert_eq!(qty.min, Some(2.0));
    assert_eq!(qty.max, Some(109.0));
    assert_eq!(qty.q50, Some(12.0));
    assert!(summaries.iter().all(|s| s.name != columns::SALES_CHAN_NAME));
}

// ============================================================================
// Round trip through the sink
// ============================================================================

#[test]
fn test_filter_and_persist() {
    let file = raw_file();
    let table = CsvTableSource::new(file.path())
        .with_schema(Schema::orders())
        .load()
        .unwrap();

    let online: Vec<bool> = match table.data(columns::SALES_CHAN_NAME).unwrap() {
        ColumnData::Text(values) => values
            .iter()
            .map(|v| v.as_deref() == Some("online"))
            .collect(),
        other => panic!("unexpected column type {:?}", other.data_type()),
    };
    let filtered: Table = table.filter_rows(&online).unwrap();
    assert_eq!(filtered.height(), 1);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("online.csv");
    CsvTableSink::new(&out).write(&filtered).unwrap();

    let reloaded = CsvTableSource::new(&out)
        .with_schema(Schema::orders())
        .load()
        .unwrap();
    assert_eq!(reloaded.height(), 1);
    assert_eq!(
        reloaded.data(columns::ORD_QTY).unwrap(),
        &ColumnData::Float(vec![Some(109.0)])
    );
}
