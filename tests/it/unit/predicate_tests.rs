//! Unit tests for search and column filters.

use crate::helpers::{TestViewBuilder, filtered_ids, people_rows};
use tableview::table::{ColumnDef, ColumnRegistry, FilterValue, RowPredicate};
use tableview::types::DataCell;

#[test]
fn test_search_is_case_insensitive_over_columns() {
    let mut view = TestViewBuilder::new().build();
    view.set_search_query("AN");
    // Anna by name, Dan by name, Eve by city (Annecy)
    assert_eq!(filtered_ids(&view, "name"), vec!["Anna", "Dan", "Eve"]);
}

#[test]
fn test_empty_search_matches_everything() {
    let predicate = RowPredicate::new("", Vec::<(String, FilterValue)>::new());
    assert!(people_rows().iter().all(|r| predicate.matches(r)));
}

#[test]
fn test_filter_excludes_missing_and_null_fields() {
    let mut view = TestViewBuilder::new().build();
    view.set_column_filter("city", "ber").unwrap();
    // Dan has no city at all
    assert_eq!(filtered_ids(&view, "name"), vec!["Anna", "Beth"]);

    view.set_column_filter("age", DataCell::Number(30.0)).unwrap();
    assert_eq!(filtered_ids(&view, "name"), vec!["Anna"]);
}

#[test]
fn test_exact_filter_is_strict() {
    let value = FilterValue::Exact(DataCell::Number(30.0));
    assert!(value.matches(Some(&DataCell::Number(30.0))));
    assert!(!value.matches(Some(&DataCell::Text("30".into()))));
    assert!(!value.matches(None));
    assert!(!value.matches(Some(&DataCell::Empty)));
}

#[test]
fn test_inactive_filters_are_ignored() {
    assert!(!FilterValue::from("").is_active());
    assert!(!FilterValue::Exact(DataCell::Empty).is_active());

    let predicate = RowPredicate::new("", [("city", FilterValue::from(""))]);
    assert_eq!(predicate.active_filter_count(), 0);
}

#[test]
fn test_each_filter_narrows_the_result() {
    let mut view = TestViewBuilder::new().build();
    let all = filtered_ids(&view, "name");

    view.set_column_filter("name", "a").unwrap();
    let one = filtered_ids(&view, "name");
    assert!(one.iter().all(|n| all.contains(n)));

    view.set_column_filter("city", "o").unwrap();
    let two = filtered_ids(&view, "name");
    assert!(two.iter().all(|n| one.contains(n)));
    assert_eq!(two, vec!["Cara"]);
}

#[test]
fn test_search_and_filter_order_does_not_matter() {
    let mut a = TestViewBuilder::new().build();
    a.set_search_query("an");
    a.set_column_filter("city", "ber").unwrap();

    let mut b = TestViewBuilder::new().build();
    b.set_column_filter("city", "ber").unwrap();
    b.set_search_query("an");

    assert_eq!(filtered_ids(&a, "name"), filtered_ids(&b, "name"));
    assert_eq!(filtered_ids(&a, "name"), vec!["Anna"]);
}

#[test]
fn test_number_filter_matches_display_text() {
    let mut view = TestViewBuilder::new().build();
    view.set_column_filter("age", "4").unwrap();
    assert_eq!(filtered_ids(&view, "name"), vec!["Eve"]);
}

#[test]
fn test_search_skips_unregistered_fields_but_not_hidden_ones() {
    let columns = ColumnRegistry::new(vec![ColumnDef::new("name"), ColumnDef::new("age")]).unwrap();
    let mut view = TestViewBuilder::new().with_columns(columns).build();
    // City exists in the rows but has no column
    view.set_search_query("oslo");
    assert_eq!(view.filtered_count(), 0);

    let columns = ColumnRegistry::new(vec![
        ColumnDef::new("name"),
        ColumnDef::new("city").hidden(),
    ])
    .unwrap();
    let mut view = TestViewBuilder::new().with_columns(columns).build();
    view.set_search_query("oslo");
    assert_eq!(filtered_ids(&view, "name"), vec!["Cara"]);
}

#[test]
fn test_search_uses_accessor_key() {
    let columns = ColumnRegistry::new(vec![ColumnDef::new("town").accessor("city")]).unwrap();
    let mut view = TestViewBuilder::new().with_columns(columns).build();
    view.set_search_query("ber");
    assert_eq!(filtered_ids(&view, "name"), vec!["Anna", "Beth"]);
}
