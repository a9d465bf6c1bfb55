//! Unit tests for settings persistence.

use std::fs;
use tableview::settings::Settings;
use tableview::theme::ThemePreference;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.json"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.default_page_size, 25);
    assert_eq!(settings.page_size_options, vec![10, 25, 50, 100]);
    assert_eq!(settings.export_delimiter, ',');
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        theme: ThemePreference::Light,
        high_contrast: true,
        default_page_size: 50,
        export_delimiter: ';',
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_invalid_values_are_sanitized_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"default_page_size": 0, "page_size_options": []}"#).unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(settings.default_page_size, 1);
    assert_eq!(settings.page_size_options, vec![10, 25, 50, 100]);
}
