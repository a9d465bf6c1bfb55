//! Interactive session over one table view.
//!
//! Each input line is one command; after every command that changes the
//! view the current page is printed again. Settings file changes are
//! picked up between commands.

use crate::cli::Context;
use crate::cli::render::render_table;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::table::{TableView, export_file_name};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const HELP: &str = "\
commands:
  search <text>          free-text search (empty clears)
  filter <col> <value>   column filter (empty value clears)
  clear <col>            remove a column filter
  reset                  clear search, filters and sort
  sort <col>             cycle asc / desc / unsorted
  page <n>               go to page n
  next | prev | first | last
  size <n>               rows per page
  toggle <col>           show or hide a column
  columns                list columns
  export [path]          write filtered rows as CSV
  show                   print the current page
  help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Search(String),
    Filter { column: String, value: String },
    Clear(String),
    Reset,
    Sort(String),
    Page(usize),
    Next,
    Prev,
    First,
    Last,
    Size(usize),
    Toggle(String),
    Columns,
    Export(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let column = |rest: &str| {
            if rest.is_empty() {
                Err(format!("usage: {} <column>", word))
            } else {
                Ok(rest.to_string())
            }
        };
        let number = |rest: &str| {
            // Negative pages clamp to the first page
            rest.parse::<i64>()
                .map(|n| n.max(0) as usize)
                .map_err(|_| format!("usage: {} <number>", word))
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "search" | "s" => ReplCommand::Search(rest.to_string()),
            "filter" | "f" => {
                let (column, value) = match rest.split_once(char::is_whitespace) {
                    Some((column, value)) => (column, value.trim()),
                    None => (rest, ""),
                };
                ReplCommand::Filter {
                    column: column_arg(column, word)?,
                    value: value.to_string(),
                }
            }
            "clear" => ReplCommand::Clear(column(rest)?),
            "reset" => ReplCommand::Reset,
            "sort" => ReplCommand::Sort(column(rest)?),
            "page" | "p" => ReplCommand::Page(number(rest)?),
            "next" | "n" => ReplCommand::Next,
            "prev" => ReplCommand::Prev,
            "first" => ReplCommand::First,
            "last" => ReplCommand::Last,
            "size" => ReplCommand::Size(number(rest)?),
            "toggle" | "t" => ReplCommand::Toggle(column(rest)?),
            "columns" | "cols" => ReplCommand::Columns,
            "export" => ReplCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "show" => ReplCommand::Show,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(cmd))
    }
}

fn column_arg(column: &str, word: &str) -> Result<String, String> {
    if column.is_empty() {
        Err(format!("usage: {} <column> <value>", word))
    } else {
        Ok(column.to_string())
    }
}

pub struct Repl {
    view: TableView,
    title: String,
    ctx: Context,
    watcher: Option<SettingsWatcher>,
}

impl Repl {
    pub fn new(view: TableView, title: impl Into<String>, ctx: Context) -> Self {
        let watcher = ctx
            .settings_path
            .clone()
            .and_then(|path| match SettingsWatcher::new(path) {
                Ok(w) => Some(w),
                Err(e) => {
                    tracing::warn!("Settings hot reload unavailable: {}", e);
                    None
                }
            });
        Self {
            view,
            title: title.into(),
            ctx,
            watcher,
        }
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "{}", render_table(&self.view, &self.ctx.theme))?;
        for line in input.lines() {
            let line = line?;
            self.check_settings_reload();

            match ReplCommand::parse(&line) {
                Ok(None) => continue,
                Ok(Some(ReplCommand::Quit)) => break,
                Ok(Some(cmd)) => self.execute(cmd, out)?,
                Err(msg) => writeln!(out, "error: {}", msg)?,
            }
        }
        Ok(())
    }

    /// Apply one command. Bad column names are reported, not fatal.
    pub fn execute<W: Write>(&mut self, cmd: ReplCommand, out: &mut W) -> Result<()> {
        let result = match cmd {
            ReplCommand::Search(q) => {
                self.view.set_search_query(q);
                Ok(())
            }
            ReplCommand::Filter { column, value } => self.view.set_column_filter(&column, value),
            ReplCommand::Clear(column) => self.view.clear_column_filter(&column),
            ReplCommand::Reset => {
                self.view.reset_filters();
                Ok(())
            }
            ReplCommand::Sort(column) => self.view.toggle_sort(&column).map(|_| ()),
            ReplCommand::Page(n) => {
                self.view.set_page(n);
                Ok(())
            }
            ReplCommand::Next => {
                self.view.next_page();
                Ok(())
            }
            ReplCommand::Prev => {
                self.view.prev_page();
                Ok(())
            }
            ReplCommand::First => {
                self.view.first_page();
                Ok(())
            }
            ReplCommand::Last => {
                self.view.last_page();
                Ok(())
            }
            ReplCommand::Size(n) => {
                if !self.ctx.settings.page_size_options.contains(&n) {
                    tracing::debug!(size = n, "Page size outside configured options");
                }
                self.view.set_items_per_page(n);
                Ok(())
            }
            ReplCommand::Toggle(column) => self.view.toggle_column_visibility(&column).map(|_| ()),
            ReplCommand::Columns => {
                for c in self.view.columns().iter() {
                    let mark = if c.visible { "x" } else { " " };
                    writeln!(out, "[{}] {} ({})", mark, c.id, c.header)?;
                }
                return Ok(());
            }
            ReplCommand::Export(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(export_file_name(&self.title)));
                let export = self.view.export();
                match export.write_to(&path, self.ctx.settings.export_delimiter) {
                    Ok(()) => writeln!(
                        out,
                        "exported {} rows to {}",
                        export.row_count(),
                        path.display()
                    )?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
                return Ok(());
            }
            ReplCommand::Show => Ok(()),
            ReplCommand::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(());
            }
            ReplCommand::Quit => return Ok(()),
        };

        match result {
            Ok(()) => write!(out, "{}", render_table(&self.view, &self.ctx.theme))?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        Ok(())
    }

    fn check_settings_reload(&mut self) {
        let Some(event) = self.watcher.as_mut().and_then(|w| w.poll()) else {
            return;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                tracing::info!("Settings file changed, reloading...");
                self.ctx.reload_settings();
                self.view.set_slow_threshold(self.ctx.settings.slow_operation_ms);
            }
            SettingsEvent::Deleted => {
                tracing::warn!("Settings file deleted");
            }
            SettingsEvent::Error(e) => {
                tracing::error!("Settings watch error: {}", e);
            }
        }
    }
}
