//! Data file to rendered page and export, as the `show` and `export`
//! commands drive it.

use std::fs;
use std::path::PathBuf;
use tableview::cli::render::render_table;
use tableview::cli::{Context, ViewArgs, build_view};
use tableview::data::{DataError, load_data_file};
use tableview::settings::Settings;
use tableview::table::SortSpec;
use tableview::theme::EnvAppearance;
use tempfile::{TempDir, tempdir};

const PEOPLE_CSV: &str = "\
id,name,age,city
1,Anna,30,Berlin
2,Beth,,Bergen
3,Cara,25,Oslo
4,Dan,30,
5,Eve,41,\"Annecy, FR\"
";

fn plain_context() -> Context {
    Context::new(
        Settings::default(),
        None,
        EnvAppearance::from_vars(None, None),
        false,
    )
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn args(file: PathBuf) -> ViewArgs {
    ViewArgs {
        file,
        columns: None,
        search: None,
        filters: Vec::new(),
        sort: None,
        page: 1,
        page_size: None,
        hidden: Vec::new(),
    }
}

#[test]
fn test_csv_show_with_flags() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir, "people.csv", PEOPLE_CSV);

    let mut view_args = args(file);
    view_args.sort = Some(SortSpec::ascending("age"));
    view_args.hidden = vec!["id".into()];
    view_args.page_size = Some(2);
    view_args.page = 3;

    let (view, name) = build_view(&view_args, &plain_context()).unwrap();
    assert_eq!(name, "people");
    assert_eq!(view.current_page(), 3);

    let text = render_table(&view, &plain_context().theme);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name  age ▲  city");
    // Beth has no age and sorts last
    assert_eq!(lines[2], "Beth  -      Bergen");
    assert_eq!(lines[3], "Showing 5-5 of 5 · page 3/3");
}

#[test]
fn test_csv_filter_and_export() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir, "people.csv", PEOPLE_CSV);

    let mut view_args = args(file);
    view_args.search = Some("an".into());
    view_args.filters = vec![("age".into(), "30".into())];

    let (view, _) = build_view(&view_args, &plain_context()).unwrap();
    assert_eq!(view.filtered_count(), 2);

    let out = dir.path().join("out.csv");
    view.export().write_to(&out, ',').unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "id,name,age,city\n1,Anna,30,Berlin\n4,Dan,30,\n"
    );
}

#[test]
fn test_quoted_field_survives_load_and_export() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir, "people.csv", PEOPLE_CSV);

    let mut view_args = args(file);
    view_args.filters = vec![("city".into(), "annecy".into())];
    let (view, _) = build_view(&view_args, &plain_context()).unwrap();

    assert_eq!(
        view.export().to_csv(),
        "id,name,age,city\n5,Eve,41,\"Annecy, FR\""
    );
}

#[test]
fn test_json_source_with_column_file() {
    let dir = tempdir().unwrap();
    let file = write_file(
        &dir,
        "staff.json",
        r#"{"data": [
            {"name": "Anna", "age": 30, "active": true},
            {"name": "Beth", "age": null},
            {"name": "Cara", "age": 25, "active": false}
        ]}"#,
    );
    let columns = write_file(
        &dir,
        "columns.json",
        r#"[
            {"id": "person", "header": "Person", "accessor_key": "name"},
            {"id": "age", "header": "Age"},
            {"id": "active", "visible": false}
        ]"#,
    );

    let mut view_args = args(file);
    view_args.columns = Some(columns);
    view_args.sort = Some(SortSpec::descending("age"));

    let (view, name) = build_view(&view_args, &plain_context()).unwrap();
    assert_eq!(name, "staff");
    assert_eq!(view.export().to_csv(), "Person,Age\nAnna,30\nCara,25\nBeth,");
}

#[test]
fn test_unknown_flag_column_is_an_error() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir, "people.csv", PEOPLE_CSV);

    let mut view_args = args(file);
    view_args.filters = vec![("salary".into(), "1".into())];
    let err = build_view(&view_args, &plain_context()).err().unwrap();
    assert!(err.to_string().contains("Unknown column: salary"));
}

#[test]
fn test_unsupported_and_empty_files() {
    let dir = tempdir().unwrap();
    let txt = write_file(&dir, "notes.txt", "a,b\n1,2\n");
    assert!(matches!(load_data_file(&txt), Err(DataError::Unsupported(_))));

    let empty = write_file(&dir, "empty.csv", "");
    assert!(matches!(load_data_file(&empty), Err(DataError::EmptyFile)));
}

#[test]
fn test_page_size_from_settings() {
    let dir = tempdir().unwrap();
    let file = write_file(&dir, "people.csv", PEOPLE_CSV);

    let ctx = Context::new(
        Settings {
            default_page_size: 2,
            ..Settings::default()
        },
        None,
        EnvAppearance::default(),
        false,
    );
    let (view, _) = build_view(&args(file), &ctx).unwrap();
    assert_eq!(view.items_per_page(), 2);
    assert_eq!(view.total_pages(), 3);
}
