//! Core row and cell types for the table engine.
//!
//! A [`DataSource`] is the fixed backing collection a table view is built
//! over. Rows are ordered mappings from accessor key to a scalar
//! [`DataCell`]; the engine never mutates them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Data Source
// ============================================================================

/// A loaded data set: column metadata plus the rows themselves.
#[derive(Clone, Debug, Serialize)]
pub struct DataSource {
    /// Human-readable name (from filename or user-defined)
    pub name: String,
    /// Column definitions, in source order
    pub columns: Vec<DataColumn>,
    /// Data rows
    pub rows: Vec<DataRow>,
    /// Where this data came from
    pub origin: DataOrigin,
}

impl DataSource {
    /// Create an empty data source for manual entry
    pub fn new_empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            origin: DataOrigin::Manual,
        }
    }

    /// Get the file path if this data source has a file origin
    pub fn file_path(&self) -> Option<&Path> {
        match &self.origin {
            DataOrigin::File { path, .. } => Some(path),
            DataOrigin::Json { path: Some(p) } => Some(p),
            _ => None,
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Column metadata as discovered by a loader
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name; also the accessor key into each row
    pub name: String,
    /// Inferred data type for this column
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Supported data types for cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
}

/// Origin of a data source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DataOrigin {
    /// Built in code
    Manual,
    /// Imported from CSV/TSV file
    File { path: PathBuf, delimiter: char },
    /// Loaded from JSON file
    Json { path: Option<PathBuf> },
}

// ============================================================================
// Rows and Cells
// ============================================================================

/// An ordered mapping from accessor key to cell value.
///
/// Keys keep insertion order. A key that is absent and a key holding
/// [`DataCell::Empty`] are both treated as null by the engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataRow {
    fields: Vec<(String, DataCell)>,
}

impl DataRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DataCell>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace the value stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DataCell>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&DataCell> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Value under `key`, with absent keys and `Empty` both mapped to `None`.
    pub fn value(&self, key: &str) -> Option<&DataCell> {
        self.get(key).filter(|cell| !cell.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataCell)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &DataCell> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<DataCell>> FromIterator<(K, V)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = DataRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for DataRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A single cell value
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DataCell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(String), // ISO 8601 format
    #[default]
    Empty,
}

impl DataCell {
    pub fn is_null(&self) -> bool {
        matches!(self, DataCell::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataCell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Parse a string into a DataCell, trying to preserve type
    pub fn parse(value: &str, hint: &DataType) -> Self {
        if value.is_empty() {
            return DataCell::Empty;
        }

        match hint {
            DataType::Number => parse_number(value)
                .map(DataCell::Number)
                .unwrap_or_else(|| DataCell::Text(value.to_string())),
            DataType::Boolean => match value.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" => DataCell::Boolean(true),
                "false" | "no" | "n" | "0" => DataCell::Boolean(false),
                _ => DataCell::Text(value.to_string()),
            },
            DataType::Date => DataCell::Date(value.to_string()),
            DataType::Text => DataCell::Text(value.to_string()),
        }
    }
}

/// Parse a number, tolerating one currency/percent symbol and thousands separators.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | '€' | '£' | ','))
        .collect();
    cleaned.parse::<f64>().ok()
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCell::Text(s) | DataCell::Date(s) => f.write_str(s),
            DataCell::Number(n) => {
                // Format nicely: no trailing zeros for whole numbers
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            DataCell::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            DataCell::Empty => Ok(()),
        }
    }
}

impl From<&str> for DataCell {
    fn from(s: &str) -> Self {
        DataCell::Text(s.to_string())
    }
}

impl From<String> for DataCell {
    fn from(s: String) -> Self {
        DataCell::Text(s)
    }
}

impl From<f64> for DataCell {
    fn from(n: f64) -> Self {
        DataCell::Number(n)
    }
}

impl From<i64> for DataCell {
    fn from(n: i64) -> Self {
        DataCell::Number(n as f64)
    }
}

impl From<i32> for DataCell {
    fn from(n: i32) -> Self {
        DataCell::Number(f64::from(n))
    }
}

impl From<bool> for DataCell {
    fn from(b: bool) -> Self {
        DataCell::Boolean(b)
    }
}

impl<T: Into<DataCell>> From<Option<T>> for DataCell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DataCell::Empty)
    }
}
