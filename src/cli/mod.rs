//! Command line front end.
//!
//! Settings are loaded and the theme is resolved here, once, and handed
//! down; nothing below this module reads the environment.

pub mod args;
pub mod render;
pub mod repl;

pub use args::{Cli, Commands, ViewArgs};

use crate::data::load_data_file;
use crate::settings::{Settings, default_settings_path};
use crate::table::{ColumnRegistry, TableView, export_file_name};
use crate::theme::{EnvAppearance, ThemeContext};
use anyhow::{Context as _, Result};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings plus the theme resolved from them.
pub struct Context {
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub theme: ThemeContext,
    appearance: EnvAppearance,
    color: bool,
}

impl Context {
    /// Load settings from `path` (or the default location) and probe the
    /// terminal appearance.
    pub fn load(path: Option<PathBuf>) -> Self {
        let settings_path = path.or_else(default_settings_path);
        let settings = settings_path
            .as_deref()
            .map(Settings::load_from)
            .unwrap_or_default();
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(settings, settings_path, EnvAppearance::detect(), color)
    }

    pub fn new(
        settings: Settings,
        settings_path: Option<PathBuf>,
        appearance: EnvAppearance,
        color: bool,
    ) -> Self {
        let theme = ThemeContext::resolve(
            settings.theme,
            settings.high_contrast,
            &appearance,
            color,
        );
        Self {
            settings,
            settings_path,
            theme,
            appearance,
            color,
        }
    }

    /// Re-read the settings file and re-resolve the theme against the
    /// appearance probed at startup.
    pub fn reload_settings(&mut self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        self.settings = Settings::load_from(path);
        self.theme = ThemeContext::resolve(
            self.settings.theme,
            self.settings.high_contrast,
            &self.appearance,
            self.color,
        );
        tracing::debug!(theme = ?self.theme.mode, "Settings reloaded");
    }
}

/// Install the global subscriber. `level` wins over `RUST_LOG`; the
/// fallback is `warn`. Logs go to stderr so table output stays clean.
pub fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.settings);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Show { view } => {
            let (view, _) = build_view(&view, &ctx)?;
            write!(stdout, "{}", render::render_table(&view, &ctx.theme))?;
        }
        Commands::Export { view, title, out } => {
            let (view, name) = build_view(&view, &ctx)?;
            let export = view.export();
            let delimiter = ctx.settings.export_delimiter;
            match out {
                Some(path) if path.as_os_str() == "-" => {
                    writeln!(stdout, "{}", export.to_delimited(delimiter))?;
                }
                out => {
                    let path = out.unwrap_or_else(|| {
                        PathBuf::from(export_file_name(title.as_deref().unwrap_or(&name)))
                    });
                    export
                        .write_to(&path, delimiter)
                        .with_context(|| format!("Failed to export to {}", path.display()))?;
                    writeln!(
                        stdout,
                        "Exported {} rows to {}",
                        export.row_count(),
                        path.display()
                    )?;
                }
            }
        }
        Commands::Repl { file, columns } => {
            let args = ViewArgs {
                file,
                columns,
                search: None,
                filters: Vec::new(),
                sort: None,
                page: 1,
                page_size: None,
                hidden: Vec::new(),
            };
            let (view, name) = build_view(&args, &ctx)?;
            let mut session = repl::Repl::new(view, name, ctx);
            session.run(io::stdin().lock(), &mut stdout)?;
        }
    }
    Ok(())
}

/// Load the data file and apply the initial view state from the flags.
/// Returns the view and the source name.
pub fn build_view(args: &ViewArgs, ctx: &Context) -> Result<(TableView, String)> {
    let source = load_data_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let name = source.name.clone();
    let origin = source.file_path().map(|p| p.display().to_string());

    let columns = match &args.columns {
        Some(path) => ColumnRegistry::from_json_file(path)
            .with_context(|| format!("Failed to load columns from {}", path.display()))?,
        None => ColumnRegistry::from_source(&source),
    };

    let mut view = TableView::new(columns, source.rows)
        .with_page_size(args.page_size.unwrap_or(ctx.settings.default_page_size))
        .with_slow_threshold(ctx.settings.slow_operation_ms);

    for id in &args.hidden {
        view.set_column_visible(id, false)?;
    }
    if let Some(query) = &args.search {
        view.set_search_query(query.as_str());
    }
    for (column, value) in &args.filters {
        view.set_column_filter(column, value.as_str())?;
    }
    if let Some(sort) = &args.sort {
        view.set_sort(Some(sort.clone()))?;
    }
    view.set_page(args.page);

    tracing::debug!(
        origin = ?origin,
        rows = view.total_count(),
        filtered = view.filtered_count(),
        "View ready"
    );
    Ok((view, name))
}
