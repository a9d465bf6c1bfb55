//! Error types for table view operations.

use thiserror::Error;

/// Errors raised by the column registry and the view controller.
///
/// These are caller mistakes (naming a column that does not exist, sorting
/// a column configured as unsortable). Missing cell values are never errors.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column is not sortable: {0}")]
    NotSortable(String),

    #[error("Column is not filterable: {0}")]
    NotFilterable(String),

    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Invalid column configuration: {0}")]
    InvalidColumns(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for table operations
pub type TableResult<T> = Result<T, TableError>;
