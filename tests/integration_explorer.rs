//! Integration tests for the column exploration workflow
//!
//! These tests load fixture files through a `Session` and verify the
//! reports a user would see for each kind of column.

#![expect(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::NaiveDate;
use colscope::config::Settings;
use colscope::error::ExplorerError;
use colscope::explorer::Session;
use colscope::explorer::logic::{ColumnKind, ColumnSummary, DateSummary, NumericSummary};
use std::path::Path;

fn sales() -> Session {
    let mut session = Session::new(Settings::default());
    session
        .upload_path(Path::new("testdata/sales.csv"))
        .expect("Fixture should load");
    session
}

#[test]
fn test_overview_of_sales() {
    let overview = sales().overview().unwrap();
    assert_eq!(overview.row_count, 10, "Should have 10 rows");
    assert_eq!(overview.column_count, 6, "Should have 6 columns");
    assert_eq!(overview.head.len(), 5, "Default head is 5 rows");

    let kinds: Vec<(&str, ColumnKind)> = overview
        .columns
        .iter()
        .map(|(n, k)| (n.as_str(), *k))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("order_id", ColumnKind::Numeric),
            ("amount", ColumnKind::Numeric),
            ("region", ColumnKind::Text),
            ("order_date", ColumnKind::Text),
            ("shipped", ColumnKind::Text),
            ("discount", ColumnKind::Numeric),
        ]
    );
}

#[test]
fn test_column_choices() {
    let session = sales();
    assert_eq!(
        session.numeric_columns().unwrap(),
        vec!["order_id", "amount", "discount"]
    );
    // No declared date columns, so every text column is offered
    assert_eq!(
        session.date_columns().unwrap(),
        vec!["region", "order_date", "shipped"]
    );
}

#[test]
fn test_explore_amount() {
    let report = sales().explore_numeric("amount").unwrap();
    let ColumnSummary::Numeric(summary) = &report.summary else {
        panic!("Expected a numeric summary");
    };
    assert_eq!(summary.unique, Some(7));
    assert_eq!(summary.missing, Some(1));
    assert_eq!(summary.zeros, Some(1));
    assert_eq!(summary.negatives, Some(1));
    assert_eq!(summary.min, Some(-15.0));
    assert_eq!(summary.max, Some(300.0));
    assert_eq!(summary.median, Some(80.0));

    let top = &report.frequency[0];
    assert_eq!(top.value, "120.5");
    assert_eq!(top.occurrence, 3);
    assert!((top.percentage - 0.3333).abs() < 1e-12);

    assert_eq!(report.histogram.len(), 7, "One bin per distinct value at most");
    let total: usize = report.histogram.iter().map(|b| b.count).sum();
    assert_eq!(total, 9, "Every non-missing value is binned");
}

#[test]
fn test_explore_empty_column() {
    let report = sales().explore_numeric("discount").unwrap();
    assert_eq!(
        report.summary,
        ColumnSummary::Numeric(NumericSummary::default())
    );
    assert!(report.frequency.is_empty());
    assert!(report.histogram.is_empty());
    assert!(report.summary_rows().iter().all(|r| r.value == "—"));
}

#[test]
fn test_explore_order_date() {
    let now = NaiveDate::from_ymd_opt(2023, 7, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let report = sales().explore_date_at("order_date", now).unwrap();

    let ColumnSummary::Datetime(summary) = &report.summary else {
        panic!("Expected a datetime summary");
    };
    assert_eq!(
        *summary,
        DateSummary {
            unique: Some(7),
            missing: Some(1),
            weekend: Some(1),
            weekday: Some(8),
            future: Some(2),
            empty_1900: Some(1),
            empty_1970: Some(1),
            min: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_hms_opt(0, 0, 0),
            max: NaiveDate::from_ymd_opt(2023, 10, 22).unwrap().and_hms_opt(0, 0, 0),
        }
    );

    let values: Vec<(&str, usize)> = report
        .frequency
        .iter()
        .take(2)
        .map(|r| (r.value.as_str(), r.occurrence))
        .collect();
    assert_eq!(values, vec![("2023-02-01", 2), ("2022-06-15", 2)]);

    let years: Vec<(&str, usize)> = report
        .histogram
        .iter()
        .map(|b| (b.label.as_str(), b.count))
        .collect();
    assert_eq!(
        years,
        vec![("1900", 1), ("1970", 1), ("2021", 1), ("2022", 2), ("2023", 4)]
    );
}

#[test]
fn test_text_column_is_not_a_date() {
    let err = sales().explore_date("region").unwrap_err();
    assert!(matches!(err, ExplorerError::DateParse(_)), "got {err:?}");
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn test_unknown_column() {
    let err = sales().explore_numeric("price").unwrap_err();
    assert_eq!(err.to_string(), "Column 'price' not found in the table");
}

#[test]
fn test_report_serializes() {
    let report = sales().explore_numeric("amount").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["column"], "amount");
    assert_eq!(json["frequency"][0]["value"], "120.5");
    assert_eq!(json["summary"]["Numeric"]["zeros"], 1);
}

#[test]
fn test_header_only_file_has_no_data() {
    let mut session = Session::default();
    session
        .upload_path(Path::new("testdata/header_only.csv"))
        .unwrap();
    assert_eq!(session.table().unwrap().row_count(), 0);

    let report = session.explore_numeric("score").unwrap();
    assert_eq!(
        report.summary,
        ColumnSummary::Numeric(NumericSummary::default())
    );
    assert!(report.frequency.is_empty());
}

#[test]
fn test_nothing_uploaded() {
    let session = Session::default();
    let err = session.explore_numeric("amount").unwrap_err();
    assert_eq!(err.to_string(), "Please upload a CSV.");
}
