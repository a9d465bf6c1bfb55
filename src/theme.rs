//! Theme context for rendering table output.
//!
//! The system appearance is probed once, at the application boundary, and
//! the resolved [`ThemeContext`] is passed to whatever renders. Renderers
//! never look at the environment themselves.

use owo_colors::{OwoColorize, Style};
use serde::{Deserialize, Serialize};

/// User preference from settings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the system appearance
    #[default]
    System,
    Light,
    Dark,
}

/// Resolved light/dark mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Source of the system's light/dark preference.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> bool;
}

/// Reads the appearance from environment variables.
///
/// `TABLEVIEW_THEME=dark|light` wins; otherwise the background index of
/// `COLORFGBG` ("fg;bg") is used. Defaults to dark.
#[derive(Clone, Debug, Default)]
pub struct EnvAppearance {
    theme_var: Option<String>,
    colorfgbg: Option<String>,
}

impl EnvAppearance {
    pub fn detect() -> Self {
        Self::from_vars(
            std::env::var("TABLEVIEW_THEME").ok(),
            std::env::var("COLORFGBG").ok(),
        )
    }

    pub fn from_vars(theme_var: Option<String>, colorfgbg: Option<String>) -> Self {
        Self {
            theme_var,
            colorfgbg,
        }
    }
}

impl SystemAppearance for EnvAppearance {
    fn prefers_dark(&self) -> bool {
        match self.theme_var.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("light") => return false,
            Some("dark") => return true,
            _ => {}
        }

        self.colorfgbg
            .as_deref()
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok())
            // ANSI 0-6 and 8 are dark backgrounds
            .map(|bg| bg <= 6 || bg == 8)
            .unwrap_or(true)
    }
}

/// Terminal styles used by the table renderer
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub header: Style,
    pub muted: Style,
    pub accent: Style,
}

impl Palette {
    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            muted: Style::new(),
            accent: Style::new(),
        }
    }
}

/// Theme handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeContext {
    pub mode: ThemeMode,
    pub high_contrast: bool,
    /// Whether ANSI styling should be emitted at all
    pub color: bool,
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Dark,
            high_contrast: false,
            color: false,
        }
    }
}

impl ThemeContext {
    /// Resolve the preference against the system appearance. Called once
    /// per settings load.
    pub fn resolve(
        preference: ThemePreference,
        high_contrast: bool,
        appearance: &dyn SystemAppearance,
        color: bool,
    ) -> Self {
        let mode = match preference {
            ThemePreference::Light => ThemeMode::Light,
            ThemePreference::Dark => ThemeMode::Dark,
            ThemePreference::System if appearance.prefers_dark() => ThemeMode::Dark,
            ThemePreference::System => ThemeMode::Light,
        };
        Self {
            mode,
            high_contrast,
            color,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Apply `style` to `text`, or return it unchanged when color is off.
    pub fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn palette(&self) -> Palette {
        if !self.color {
            return Palette::plain();
        }

        match (self.mode, self.high_contrast) {
            (ThemeMode::Dark, false) => Palette {
                header: Style::new().bold().bright_cyan(),
                muted: Style::new().bright_black(),
                accent: Style::new().yellow(),
            },
            (ThemeMode::Light, false) => Palette {
                header: Style::new().bold().blue(),
                muted: Style::new().dimmed(),
                accent: Style::new().magenta(),
            },
            (ThemeMode::Dark, true) => Palette {
                header: Style::new().bold().underline().bright_white(),
                muted: Style::new().white(),
                accent: Style::new().bold().bright_yellow(),
            },
            (ThemeMode::Light, true) => Palette {
                header: Style::new().bold().underline().black(),
                muted: Style::new().black(),
                accent: Style::new().bold().blue(),
            },
        }
    }
}
