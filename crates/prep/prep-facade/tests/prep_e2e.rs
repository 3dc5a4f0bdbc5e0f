//! End-to-end tests: raw CSV in, encoded feature table out.

use std::io::Write;

use chrono::NaiveDate;
use prep_facade::{
    clean, derive_features, encode, ColumnData, FixedHolidayCalendar, PrepConfig, PrepPipeline,
    Table,
};
use table_core::{CsvTableSource, Schema};
use table_spi::TableSource;

fn two_orders() -> Table {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "order_date,item_price,ord_qty,sales_chan_name\n\
         2023-06-18,10,5,online\n\
         2023-06-19,-1,3,offline\n"
    )
    .unwrap();

    CsvTableSource::new(file.path())
        .with_schema(Schema::orders())
        .load()
        .unwrap()
}

fn int(table: &Table, name: &str) -> Option<i64> {
    match table.data(name).unwrap() {
        ColumnData::Int(values) => values[0],
        other => panic!("{} is {:?}", name, other.data_type()),
    }
}

#[test]
fn test_stage_by_stage() {
    let raw = two_orders();
    let no_holidays = FixedHolidayCalendar::from_dates(Vec::<NaiveDate>::new());

    let cleaned = clean(&raw).unwrap();
    assert_eq!(cleaned.height(), 1);

    let features = derive_features(&cleaned, "order_date", &no_holidays).unwrap();
    assert_eq!(int(&features, "year"), Some(2023));
    assert_eq!(int(&features, "month"), Some(6));
    assert_eq!(int(&features, "day"), Some(18));
    assert_eq!(int(&features, "weekday"), Some(6));
    assert_eq!(
        features.data("season").unwrap(),
        &ColumnData::from(vec!["Summer"])
    );
    assert_eq!(
        features.data("is_promo").unwrap(),
        &ColumnData::from(vec![true])
    );
    assert_eq!(
        features.data("is_holiday").unwrap(),
        &ColumnData::from(vec![false])
    );

    let encoded = encode(&features, &["order_date"]).unwrap();
    assert_eq!(int(&encoded, "sales_chan_name_online"), Some(1));
    assert!(!encoded.has_column("sales_chan_name_offline"));
}

#[test]
fn test_pipeline_matches_stage_by_stage() {
    let raw = two_orders();
    let pipeline = PrepPipeline::new(
        PrepConfig::default(),
        Box::new(FixedHolidayCalendar::from_dates(Vec::<NaiveDate>::new())),
    )
    .unwrap();

    let output = pipeline.run(&raw).unwrap();
    assert_eq!(output.cleaned, clean(&raw).unwrap());
    assert_eq!(output.features.height(), 1);
    assert_eq!(int(&output.encoded, "sales_chan_name_online"), Some(1));
    assert_eq!(int(&output.encoded, "season_Summer"), Some(1));
    assert_eq!(
        output.encoder.feature_names(),
        vec!["sales_chan_name_online", "season_Summer", "month_phase_Mid"]
    );
}
