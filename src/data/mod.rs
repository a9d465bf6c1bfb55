//! Data parsing and handling module
//!
//! This module provides the row sources a table view is built over:
//! delimited text (CSV/TSV) and JSON arrays of objects.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `TooLarge`: File exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `Io`: File system errors
//! - `Csv`/`Json`: Parse errors

mod csv_parser;
mod error;
mod json_parser;

pub use csv_parser::*;
pub use error::*;
pub use json_parser::*;

use crate::perf::measure_and_log;
use crate::types::DataSource;
use std::path::Path;

/// Parsing slower than this is logged as a warning
const SLOW_LOAD_MS: f64 = 500.0;

/// Load a data file, dispatching on its extension.
pub fn load_data_file(path: &Path) -> DataResult<DataSource> {
    if !is_data_file(path) {
        return Err(DataError::Unsupported(path.display().to_string()));
    }
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let source = measure_and_log("load_data_file", SLOW_LOAD_MS, || {
        if is_json {
            parse_json_file(path)
        } else {
            parse_csv_file(path)
        }
    })?;
    tracing::debug!(
        name = %source.name,
        rows = source.row_count(),
        columns = source.column_count(),
        "Loaded data source"
    );
    Ok(source)
}
