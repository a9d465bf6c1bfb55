pub mod cli;
pub mod constants;
pub mod data;
pub mod perf;
pub mod settings;
pub mod settings_watcher;
pub mod table;
pub mod theme;
pub mod types;
