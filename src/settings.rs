//! User settings, stored as JSON.
//!
//! Every field has a default, so a partial (or missing) settings file is
//! fine. A malformed file is reported and replaced by defaults.

use crate::constants::{
    DEFAULT_EXPORT_DELIMITER, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, SLOW_OPERATION_MS,
};
use crate::theme::ThemePreference;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemePreference,
    pub high_contrast: bool,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub export_delimiter: char,
    /// Recompute time above which a warning is logged
    pub slow_operation_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            high_contrast: false,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            export_delimiter: DEFAULT_EXPORT_DELIMITER,
            slow_operation_ms: SLOW_OPERATION_MS,
        }
    }
}

impl Settings {
    /// Load from the default location, or defaults if there is none.
    pub fn load() -> Self {
        default_settings_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load from `path`. Missing files yield defaults silently; unreadable
    /// or malformed files yield defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read settings: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&content) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Invalid settings file: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Clamp values the table engine cannot use.
    fn sanitized(mut self) -> Self {
        self.default_page_size = self.default_page_size.max(1);
        self.page_size_options.retain(|&n| n > 0);
        if self.page_size_options.is_empty() {
            self.page_size_options = PAGE_SIZE_OPTIONS.to_vec();
        }
        if matches!(self.export_delimiter, '"' | '\n' | '\r') {
            tracing::warn!(delimiter = ?self.export_delimiter, "Unusable export delimiter, using default");
            self.export_delimiter = DEFAULT_EXPORT_DELIMITER;
        }
        self
    }
}

/// `<config dir>/tableview/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tableview").join("settings.json"))
}
