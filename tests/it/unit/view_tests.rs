//! Unit tests for the view controller.

use crate::helpers::{TestViewBuilder, filtered_ids, page_ids};
use tableview::table::{ColumnDef, ColumnRegistry, SortSpec, TableError};

#[test]
fn test_unknown_column_leaves_state_unchanged() {
    let mut view = TestViewBuilder::new().build();
    view.set_column_filter("name", "a").unwrap();
    let before = view.state();

    assert!(matches!(
        view.set_column_filter("nope", "x"),
        Err(TableError::UnknownColumn(_))
    ));
    assert!(matches!(view.toggle_sort("nope"), Err(TableError::UnknownColumn(_))));
    assert!(view.toggle_column_visibility("nope").is_err());
    assert!(view.clear_column_filter("nope").is_err());

    assert_eq!(view.state(), before);
}

#[test]
fn test_unsortable_and_unfilterable_columns() {
    let columns = ColumnRegistry::new(vec![
        ColumnDef::new("name").unsortable(),
        ColumnDef::new("age").unfilterable(),
    ])
    .unwrap();
    let mut view = TestViewBuilder::new().with_columns(columns).build();

    assert!(matches!(view.toggle_sort("name"), Err(TableError::NotSortable(_))));
    assert!(matches!(
        view.set_sort(Some(SortSpec::ascending("name"))),
        Err(TableError::NotSortable(_))
    ));
    assert!(matches!(
        view.set_column_filter("age", "30"),
        Err(TableError::NotFilterable(_))
    ));
    assert!(view.sort_spec().is_none());
    assert_eq!(view.active_filter_count(), 0);
}

#[test]
fn test_reset_clears_everything_and_is_idempotent() {
    let mut view = TestViewBuilder::new().with_page_size(2).build();
    view.set_search_query("e");
    view.set_column_filter("city", "o").unwrap();
    view.toggle_sort("age").unwrap();
    view.set_page(2);

    view.reset_filters();
    let once = view.state();
    assert_eq!(once.search_query, "");
    assert!(once.active_filters.is_empty());
    assert!(once.sort.is_none());
    assert_eq!(once.current_page, 1);
    assert_eq!(once.filtered_count, 5);

    view.reset_filters();
    assert_eq!(view.state(), once);
}

#[test]
fn test_empty_filter_value_removes_entry() {
    let mut view = TestViewBuilder::new().build();
    view.set_column_filter("city", "ber").unwrap();
    assert_eq!(view.active_filter_count(), 1);

    view.set_column_filter("city", "").unwrap();
    assert_eq!(view.active_filter_count(), 0);
    assert_eq!(view.filtered_count(), 5);
}

#[test]
fn test_hidden_column_keeps_filtering() {
    let mut view = TestViewBuilder::new().build();
    view.set_column_filter("city", "ber").unwrap();

    assert!(!view.toggle_column_visibility("city").unwrap());
    let headers: Vec<&str> = view.visible_columns().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(headers, vec!["name", "age"]);
    assert_eq!(filtered_ids(&view, "name"), vec!["Anna", "Beth"]);

    assert!(view.toggle_column_visibility("city").unwrap());
    assert_eq!(view.visible_columns().len(), 3);
}

#[test]
fn test_accessor_key_differs_from_id() {
    let columns = ColumnRegistry::from_json(
        r#"[
            {"id": "who", "header": "Person", "accessor_key": "name"},
            {"id": "years", "accessor_key": "age", "data_type": "number"}
        ]"#,
    )
    .unwrap();
    let mut view = TestViewBuilder::new().with_columns(columns).build();

    view.set_column_filter("who", "a").unwrap();
    view.toggle_sort("years").unwrap();
    view.toggle_sort("years").unwrap();

    assert_eq!(page_ids(&view, "name"), vec!["Anna", "Dan", "Cara"]);
    assert_eq!(view.active_filters().keys().collect::<Vec<_>>(), vec!["who"]);
}

#[test]
fn test_duplicate_column_ids_rejected() {
    let result = ColumnRegistry::new(vec![ColumnDef::new("a"), ColumnDef::new("a")]);
    assert!(matches!(result, Err(TableError::DuplicateColumn(id)) if id == "a"));
}

#[test]
fn test_page_rows_follow_sort() {
    let mut view = TestViewBuilder::new().with_page_size(2).build();
    view.set_sort(Some(SortSpec::descending("name"))).unwrap();
    assert_eq!(page_ids(&view, "name"), vec!["Eve", "Dan"]);
    view.next_page();
    assert_eq!(page_ids(&view, "name"), vec!["Cara", "Beth"]);
    view.last_page();
    assert_eq!(page_ids(&view, "name"), vec!["Anna"]);
}
