//! Column descriptors and the ordered registry that holds them.

use crate::table::error::{TableError, TableResult};
use crate::types::{DataSource, DataType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Describes one column of a table view.
///
/// `id` is the stable identity used by sort and filter state;
/// `accessor_key` names the row field the column reads, and may differ
/// from `id` so one field can back several columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColumnDefConfig")]
pub struct ColumnDef {
    pub id: String,
    pub header: String,
    pub accessor_key: String,
    pub visible: bool,
    pub sortable: bool,
    pub filterable: bool,
    pub data_type: DataType,
}

impl ColumnDef {
    /// A visible, sortable, filterable text column whose header and
    /// accessor key both equal `id`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            accessor_key: id.clone(),
            id,
            visible: true,
            sortable: true,
            filterable: true,
            data_type: DataType::Text,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor_key = key.into();
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }
}

/// On-disk shape of a column definition; everything but `id` is optional.
#[derive(Deserialize)]
struct ColumnDefConfig {
    id: String,
    header: Option<String>,
    accessor_key: Option<String>,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "default_true")]
    sortable: bool,
    #[serde(default = "default_true")]
    filterable: bool,
    #[serde(default)]
    data_type: DataType,
}

fn default_true() -> bool {
    true
}

impl From<ColumnDefConfig> for ColumnDef {
    fn from(raw: ColumnDefConfig) -> Self {
        Self {
            header: raw.header.unwrap_or_else(|| raw.id.clone()),
            accessor_key: raw.accessor_key.unwrap_or_else(|| raw.id.clone()),
            id: raw.id,
            visible: raw.visible,
            sortable: raw.sortable,
            filterable: raw.filterable,
            data_type: raw.data_type,
        }
    }
}

/// Ordered set of column descriptors with unique ids.
///
/// Hiding a column only flips its `visible` flag; columns are never removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDef>,
}

impl ColumnRegistry {
    pub fn new(columns: Vec<ColumnDef>) -> TableResult<Self> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// One column per source column, in source order.
    pub fn from_source(source: &DataSource) -> Self {
        Self {
            columns: source
                .columns
                .iter()
                .map(|c| ColumnDef::new(c.name.clone()).data_type(c.data_type))
                .collect(),
        }
    }

    /// Load column definitions from a JSON array file.
    pub fn from_json_file(path: &Path) -> TableResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> TableResult<Self> {
        let columns: Vec<ColumnDef> = serde_json::from_str(json)?;
        Self::new(columns)
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn require(&self, id: &str) -> TableResult<&ColumnDef> {
        self.get(id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter()
    }

    /// Visible columns, in registry order.
    pub fn visible(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> TableResult<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TableError::UnknownColumn(id.to_string()))?;
        column.visible = visible;
        Ok(())
    }

    /// Flip a column's visibility and return the new state.
    pub fn toggle_visibility(&mut self, id: &str) -> TableResult<bool> {
        let visible = !self.require(id)?.visible;
        self.set_visible(id, visible)?;
        Ok(visible)
    }
}
