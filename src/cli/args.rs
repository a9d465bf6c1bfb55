use crate::table::SortSpec;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tableview")]
#[command(about = "Search, filter, sort, page and export tabular data", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tableview=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of the table
    Show {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Write the filtered rows of the visible columns as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Title used to name the output file
        #[arg(long)]
        title: Option<String>,

        /// Output path, or `-` for stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Interactive session reading commands from stdin
    Repl {
        file: PathBuf,

        #[arg(long)]
        columns: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// CSV, TSV or JSON data file
    pub file: PathBuf,

    /// JSON file with column definitions
    #[arg(long)]
    pub columns: Option<PathBuf>,

    #[arg(long)]
    pub search: Option<String>,

    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    #[arg(long, value_name = "COLUMN[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Option<SortSpec>,

    #[arg(long, default_value = "1")]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long = "hide", value_name = "COLUMN")]
    pub hidden: Vec<String>,
}

pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (column, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{}'", s))?;
    if column.is_empty() {
        return Err("filter column must not be empty".to_string());
    }
    Ok((column.to_string(), value.to_string()))
}

/// `COLUMN`, `COLUMN:asc` or `COLUMN:desc`. Any other suffix is part of
/// the column id, so ids like `time:utc` still work.
pub fn parse_sort(s: &str) -> Result<SortSpec, String> {
    let (column, descending) = match s.rsplit_once(':') {
        Some((column, dir)) if dir.eq_ignore_ascii_case("asc") => (column, false),
        Some((column, dir)) if dir.eq_ignore_ascii_case("desc") => (column, true),
        _ => (s, false),
    };
    if column.is_empty() {
        return Err("sort column must not be empty".to_string());
    }
    if descending {
        Ok(SortSpec::descending(column))
    } else {
        Ok(SortSpec::ascending(column))
    }
}
