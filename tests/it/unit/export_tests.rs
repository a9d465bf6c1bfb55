//! Unit tests for delimited export.

use crate::helpers::TestViewBuilder;
use tableview::data::parse_csv_content;
use tableview::table::{TableExport, export_file_name};
use tableview::types::{DataCell, DataRow};
use tempfile::tempdir;

#[test]
fn test_export_covers_all_filtered_rows_not_just_page() {
    let mut view = TestViewBuilder::new().with_page_size(1).build();
    view.set_column_filter("city", "ber").unwrap();

    let export = view.export();
    assert_eq!(export.row_count(), view.filtered_count());
    assert_eq!(export.row_count(), 2);
}

#[test]
fn test_export_uses_visible_columns_and_empty_nulls() {
    let mut view = TestViewBuilder::new().build();
    view.toggle_column_visibility("city").unwrap();
    view.toggle_sort("age").unwrap();

    assert_eq!(
        view.export().to_csv(),
        "Name,Age\nCara,25\nAnna,30\nDan,30\nEve,41\nBeth,"
    );
}

#[test]
fn test_export_quotes_special_fields() {
    let rows = vec![
        DataRow::new()
            .with("name", "Smith, Jane")
            .with("age", 1)
            .with("city", "say \"hi\""),
    ];
    let view = TestViewBuilder::new().with_rows(rows).build();
    assert_eq!(
        view.export().to_csv(),
        "Name,Age,City\n\"Smith, Jane\",1,\"say \"\"hi\"\"\""
    );
    assert_eq!(
        view.export().to_delimited(';'),
        "Name;Age;City\nSmith, Jane;1;\"say \"\"hi\"\"\""
    );
}

#[test]
fn test_write_to_replaces_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    std::fs::write(&path, "stale").unwrap();

    let export = TableExport {
        headers: vec!["a".into()],
        rows: vec![vec!["1".into()], vec!["2".into()]],
    };
    export.write_to(&path, ',').unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n1\n2\n");
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name("Q3 Sales Report!"), "q3-sales-report.csv");
    assert_eq!(export_file_name("  "), "table.csv");
}

#[test]
fn test_export_reads_back_through_csv_loader() {
    let rows = vec![
        DataRow::new()
            .with("name", " padded ")
            .with("age", 7)
            .with("city", "Smith, \"Jr\""),
    ];
    let view = TestViewBuilder::new().with_rows(rows).build();

    let source = parse_csv_content(&view.export().to_csv(), ',', None).unwrap();
    let row = &source.rows[0];
    assert_eq!(row.get("Name"), Some(&DataCell::Text(" padded ".into())));
    assert_eq!(row.get("Age"), Some(&DataCell::Number(7.0)));
    assert_eq!(row.get("City"), Some(&DataCell::Text("Smith, \"Jr\"".into())));
}
