//! Unit tests for the table engine and its support modules.

mod export_tests;
mod perf_tests;
mod predicate_tests;
mod settings_tests;
mod settings_watcher_tests;
mod view_tests;
