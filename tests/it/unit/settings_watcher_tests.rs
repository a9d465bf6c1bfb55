//! Unit tests for settings_watcher module.

use std::fs;
use std::io::Write;
use tableview::settings_watcher::{SettingsWatcher, default_settings_path};
use tempfile::tempdir;

#[test]
fn test_watcher_creation() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let watcher = SettingsWatcher::new(settings_path.clone()).unwrap();
    assert_eq!(watcher.path(), settings_path.as_path());
}

#[test]
fn test_watcher_on_missing_file() {
    // The directory is watched, so the file itself may not exist yet
    let dir = tempdir().unwrap();
    let watcher = SettingsWatcher::new(dir.path().join("settings.json"));
    assert!(watcher.is_ok());
}

#[test]
fn test_default_paths() {
    let settings = default_settings_path();
    assert!(settings.is_some() || cfg!(target_os = "unknown"));
    if let Some(path) = settings {
        assert!(path.ends_with("tableview/settings.json"));
    }
}

/// File system event delivery is timing-dependent and platform-specific,
/// so this only checks that polling after a write does not fail.
#[test]
#[ignore]
fn test_file_modification_detection() {
    let dir = tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    fs::write(&settings_path, "{}").unwrap();

    let mut watcher = SettingsWatcher::new(settings_path.clone()).unwrap();

    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(&settings_path)
        .unwrap();
    writeln!(file, "{{\"theme\": \"light\"}}").unwrap();
    file.sync_all().unwrap();

    let _event = watcher.poll();
}
