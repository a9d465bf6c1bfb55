//! CSV and TSV file parsing
//!
//! Parses CSV/TSV files into DataSource structs with automatic type inference.
//!
//! ## Memory Limits
//!
//! To prevent unbounded memory growth:
//! - Files larger than 100MB are rejected (see [`MAX_CSV_SIZE_MB`])
//! - Files with more than 100,000 rows are rejected (see [`MAX_CSV_ROWS`])

use crate::constants::{MAX_CSV_ROWS, MAX_CSV_SIZE_MB, TYPE_INFERENCE_SAMPLE};
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn, DataOrigin, DataRow, DataSource, DataType};
use std::path::Path;

/// Parse a CSV or TSV file into a DataSource
///
/// Automatically detects delimiter based on file extension (.tsv uses tab)
/// or content analysis (whichever delimiter appears more frequently).
pub fn parse_csv_file(path: &Path) -> DataResult<DataSource> {
    // Check file size before reading
    let metadata = std::fs::metadata(path)?;
    let size_mb = metadata.len() / (1024 * 1024);
    if size_mb > MAX_CSV_SIZE_MB as u64 {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: MAX_CSV_SIZE_MB,
        });
    }

    let content = std::fs::read_to_string(path)?;

    let delimiter = detect_delimiter(path, &content);
    tracing::debug!(path = %path.display(), ?delimiter, "Parsing delimited file");
    parse_csv_content(&content, delimiter, Some(path))
}

/// Parse CSV/TSV content from a string
///
/// Each data row becomes a [`DataRow`] keyed by the (trimmed, de-duplicated)
/// header names. Short rows leave trailing columns absent; extra cells are
/// dropped.
pub fn parse_csv_content(
    content: &str,
    delimiter: char,
    source_path: Option<&Path>,
) -> DataResult<DataSource> {
    let mut lines = content.lines();

    // Parse header row
    let header_line = lines
        .by_ref()
        .find(|l| !l.trim().is_empty())
        .ok_or(DataError::EmptyFile)?;
    let headers = unique_headers(split_csv_line(header_line, delimiter));

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::NoColumns);
    }

    // Parse data rows with limit
    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if rows.len() >= MAX_CSV_ROWS {
            return Err(DataError::TooManyRows {
                rows: rows.len() + 1, // +1 for the current row that exceeded limit
                max_rows: MAX_CSV_ROWS,
            });
        }
        rows.push(split_csv_line(line, delimiter));
    }

    // Infer column types from data
    let columns: Vec<DataColumn> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| DataColumn::new(name, infer_column_type(&rows, i)))
        .collect();

    // Convert to typed cells
    let data_rows: Vec<DataRow> = rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&columns)
                .map(|(cell, column)| {
                    (column.name.clone(), DataCell::parse(cell, &column.data_type))
                })
                .collect()
        })
        .collect();

    let name = source_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("Data")
        .to_string();

    Ok(DataSource {
        name,
        columns,
        rows: data_rows,
        origin: DataOrigin::File {
            path: source_path.map(Path::to_path_buf).unwrap_or_default(),
            delimiter,
        },
    })
}

/// Detect the delimiter to use for parsing
fn detect_delimiter(path: &Path, content: &str) -> char {
    // Check file extension first
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if ext.eq_ignore_ascii_case("tsv") {
            return '\t';
        }
    }

    // Count delimiters in first few lines to determine most likely
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let semicolon_count = first_lines.matches(';').count();

    if tab_count > comma_count && tab_count > semicolon_count {
        '\t'
    } else if semicolon_count > comma_count {
        ';'
    } else {
        ','
    }
}

/// Rename repeated headers (`name`, `name_2`, ...) so every column has its own key
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(raw.len());
    for header in raw {
        let base = header.trim().to_string();
        let mut candidate = base.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Split a CSV line respecting quoted fields and doubled quotes.
///
/// Unquoted fields are trimmed; quoted fields keep their inner whitespace
/// and only the padding around the quotes is dropped.
fn split_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut result = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    let finish = |field: &mut String, quoted: bool| {
        let value = if quoted {
            std::mem::take(field)
        } else {
            field.trim().to_string()
        };
        field.clear();
        value
    };

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' if in_quotes => in_quotes = false,
            '"' if !quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quoted = true;
            }
            c if c == delimiter && !in_quotes => {
                result.push(finish(&mut field, quoted));
                quoted = false;
            }
            c if quoted && !in_quotes && c.is_whitespace() => {}
            c => field.push(c),
        }
    }
    result.push(finish(&mut field, quoted));

    result
}

/// Check if a string looks like a number
///
/// Rejects strings with multiple symbols or non-numeric characters beyond
/// single symbols like $ or %.
///
/// # Examples
/// - `"123"` -> true
/// - `"$123.45"` -> true
/// - `"1,2,3"` -> false (too many symbols)
/// - `"abc"` -> false
fn looks_like_number(s: &str) -> bool {
    let cleaned = s.trim();
    if cleaned.is_empty() {
        return false;
    }

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let symbol_count = cleaned.matches(['$', '%', '€', '£']).count();
    if symbol_count > 1 {
        return false;
    }

    // More than 1 comma is suspicious for thousand separators
    if cleaned.matches(',').count() > 1 {
        return false;
    }

    crate::types::parse_number(cleaned).is_some()
}

/// Infer the data type for a column by sampling values
fn infer_column_type(rows: &[Vec<String>], col_idx: usize) -> DataType {
    let sample: Vec<&str> = rows
        .iter()
        .take(TYPE_INFERENCE_SAMPLE)
        .filter_map(|r| r.get(col_idx).map(|s| s.as_str()))
        .filter(|s| !s.trim().is_empty())
        .collect();

    if sample.is_empty() {
        return DataType::Text;
    }

    if sample.iter().all(|s| looks_like_number(s)) {
        return DataType::Number;
    }

    let all_bools = sample.iter().all(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "false" | "yes" | "no" | "y" | "n"
        )
    });
    if all_bools {
        return DataType::Boolean;
    }

    // Common date patterns: YYYY-MM-DD, MM/DD/YYYY, DD/MM/YYYY
    let looks_like_dates = sample.iter().all(|s| {
        let trimmed = s.trim();
        (8..=10).contains(&trimmed.len())
            && (trimmed.contains('-') || trimmed.contains('/'))
            && trimmed.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '/')
    });
    if looks_like_dates {
        return DataType::Date;
    }

    DataType::Text
}

/// Check if a file path is a data file (CSV/TSV/JSON)
pub fn is_data_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "json"))
        .unwrap_or(false)
}

/// Quote a CSV field if necessary (contains delimiter, quotes, or newlines)
///
/// Values with leading or trailing whitespace are quoted too, since the
/// parser trims unquoted fields.
pub fn quote_csv_field(value: &str, delimiter: char) -> String {
    let needs_quoting = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r')
        || value.trim() != value;

    if needs_quoting {
        // Escape internal quotes by doubling them
        let escaped = value.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        value.to_string()
    }
}
