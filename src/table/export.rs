//! Delimited-text export of a table view.
//!
//! Exports cover every filtered row (not just the current page) and only
//! the visible columns, in registry order. Fields are quoted RFC 4180
//! style when they contain the delimiter, a quote, or a line break.
//!
//! Records end with `\n`, not the CRLF of RFC 4180. The CSV loader reads
//! such output back field for field, except values containing a line
//! break: it is line based and does not join quoted multi-line fields.

use crate::constants::{DEFAULT_EXPORT_DELIMITER, DEFAULT_EXPORT_NAME};
use crate::data::quote_csv_field;
use crate::table::columns::ColumnDef;
use crate::table::error::TableResult;
use crate::types::DataRow;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Header labels and stringified rows, before any delimiting.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TableExport {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableExport {
    /// Null and absent values become empty strings.
    pub fn build<'a>(
        columns: &[&ColumnDef],
        rows: impl IntoIterator<Item = &'a DataRow>,
    ) -> Self {
        let headers = columns.iter().map(|c| c.header.clone()).collect();
        let rows = rows
            .into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| {
                        row.get(&c.accessor_key)
                            .map(|cell| cell.to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn to_delimited(&self, delimiter: char) -> String {
        let sep = delimiter.to_string();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);

        let join = |fields: &[String]| {
            fields
                .iter()
                .map(|f| quote_csv_field(f, delimiter))
                .collect::<Vec<_>>()
                .join(&sep)
        };

        lines.push(join(&self.headers));
        for row in &self.rows {
            lines.push(join(row));
        }

        lines.join("\n")
    }

    pub fn to_csv(&self) -> String {
        self.to_delimited(DEFAULT_EXPORT_DELIMITER)
    }

    /// Write the export to `path`, replacing any existing file atomically.
    pub fn write_to(&self, path: &Path, delimiter: char) -> TableResult<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_delimited(delimiter).as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::info!(path = %path.display(), rows = self.row_count(), "Exported table");
        Ok(())
    }
}

/// Lowercase ASCII slug: runs of non-alphanumerics collapse to one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Download file name for an export titled `title`.
pub fn export_file_name(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        format!("{}.csv", DEFAULT_EXPORT_NAME)
    } else {
        format!("{}.csv", slug)
    }
}
