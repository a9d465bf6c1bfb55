//! Single-column sorting with a fixed nulls-last policy.

use crate::types::{DataCell, DataRow};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The active sort: one column, one direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }
}

/// Next sort state after clicking `column_id`'s header.
///
/// The same column cycles unsorted → ascending → descending → unsorted;
/// a different column starts over at ascending.
pub fn next_sort(current: Option<&SortSpec>, column_id: &str) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.column_id == column_id => match spec.direction {
            SortDirection::Ascending => Some(SortSpec::descending(column_id)),
            SortDirection::Descending => None,
        },
        _ => Some(SortSpec::ascending(column_id)),
    }
}

/// Natural ordering of two non-null cells.
///
/// Numbers compare numerically, text and dates lexicographically, booleans
/// `false < true`. Cells of different variants order by variant rank
/// (number, date, boolean, text), so a mixed column still sorts totally.
pub fn compare_cells(a: &DataCell, b: &DataCell) -> Ordering {
    match (a, b) {
        (DataCell::Number(na), DataCell::Number(nb)) => na.total_cmp(nb),
        (DataCell::Text(ta), DataCell::Text(tb)) => ta.cmp(tb),
        (DataCell::Date(da), DataCell::Date(db)) => da.cmp(db),
        (DataCell::Boolean(ba), DataCell::Boolean(bb)) => ba.cmp(bb),
        (a, b) => variant_rank(a).cmp(&variant_rank(b)),
    }
}

fn variant_rank(cell: &DataCell) -> u8 {
    match cell {
        DataCell::Number(_) => 0,
        DataCell::Date(_) => 1,
        DataCell::Boolean(_) => 2,
        DataCell::Text(_) => 3,
        DataCell::Empty => 4,
    }
}

/// Compare two rows on `accessor_key`.
///
/// Null or absent values sort after present ones in both directions;
/// `direction` only reverses the comparison between present values.
pub fn compare_rows(a: &DataRow, b: &DataRow, accessor_key: &str, direction: SortDirection) -> Ordering {
    match (a.value(accessor_key), b.value(accessor_key)) {
        (Some(va), Some(vb)) => {
            let cmp = compare_cells(va, vb);
            match direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable-sort row indices by one column; ties keep their incoming order.
pub fn sort_indices(rows: &[DataRow], indices: &mut [usize], accessor_key: &str, direction: SortDirection) {
    indices.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], accessor_key, direction));
}
