//! Row predicates: free-text search and per-column filters.
//!
//! A row is kept iff it passes the search (or the search is empty) AND
//! every active column filter. Null or absent fields never match.

use crate::types::{DataCell, DataRow};
use serde::{Deserialize, Serialize};

/// Value of a single column filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    /// Case-insensitive substring match on the stringified field
    Text(String),
    /// Strict equality: same cell variant and same value
    Exact(DataCell),
}

impl FilterValue {
    /// Inactive filters (empty text, null exact value) are ignored.
    pub fn is_active(&self) -> bool {
        match self {
            FilterValue::Text(s) => !s.is_empty(),
            FilterValue::Exact(cell) => !cell.is_null(),
        }
    }

    /// Check a field value against this filter.
    pub fn matches(&self, cell: Option<&DataCell>) -> bool {
        let Some(cell) = cell.filter(|c| !c.is_null()) else {
            return false;
        };
        match self {
            FilterValue::Text(needle) => contains_ignore_case(cell, &needle.to_lowercase()),
            FilterValue::Exact(expected) => cell == expected,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<DataCell> for FilterValue {
    fn from(cell: DataCell) -> Self {
        match cell {
            DataCell::Text(s) => FilterValue::Text(s),
            other => FilterValue::Exact(other),
        }
    }
}

/// `needle_lower` must already be lowercased.
fn contains_ignore_case(cell: &DataCell, needle_lower: &str) -> bool {
    cell.to_string().to_lowercase().contains(needle_lower)
}

/// Compiled search + filters, ready to be evaluated against many rows.
///
/// Filters are keyed by the accessor key of the column they constrain.
#[derive(Clone, Debug, Default)]
pub struct RowPredicate {
    query: Option<String>,
    /// Fields the search looks at; `None` searches every field
    search_keys: Option<Vec<String>>,
    filters: Vec<(String, FilterValue)>,
}

impl RowPredicate {
    pub fn new<I, K>(search_query: &str, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, FilterValue)>,
        K: Into<String>,
    {
        let query = (!search_query.is_empty()).then(|| search_query.to_lowercase());
        let filters = filters
            .into_iter()
            .filter(|(_, value)| value.is_active())
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            query,
            search_keys: None,
            filters,
        }
    }

    /// Limit the search to the given field keys.
    pub fn with_search_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.search_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// True if a searched field of the row contains the query. An empty
    /// query matches every row.
    pub fn matches_search(&self, row: &DataRow) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        match &self.search_keys {
            None => row
                .values()
                .filter(|cell| !cell.is_null())
                .any(|cell| contains_ignore_case(cell, query)),
            Some(keys) => keys
                .iter()
                .filter_map(|key| row.value(key))
                .any(|cell| contains_ignore_case(cell, query)),
        }
    }

    /// True if every active filter holds for the row.
    pub fn matches_filters(&self, row: &DataRow) -> bool {
        self.filters
            .iter()
            .all(|(key, value)| value.matches(row.get(key)))
    }

    pub fn matches(&self, row: &DataRow) -> bool {
        self.matches_search(row) && self.matches_filters(row)
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }
}
