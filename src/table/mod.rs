//! In-memory table engine.
//!
//! Builds a paged, searchable, sortable view over a fixed row collection:
//!
//! - [`columns`]: column descriptors and their ordered registry
//! - [`predicate`]: free-text search and per-column filters
//! - [`sort`]: single-column comparator, nulls always last
//! - [`paginator`]: page slicing and clamping
//! - [`export`]: delimited text of the filtered rows
//! - [`view`]: the controller that owns view state and ties it together
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut view = TableView::from_source(parse_csv_file(path)?);
//! view.set_search_query("anna");
//! view.toggle_sort("age")?;
//! for row in view.page_rows() { /* render */ }
//! let csv = view.export().to_csv();
//! ```

pub mod columns;
mod error;
pub mod export;
pub mod paginator;
pub mod predicate;
pub mod sort;
pub mod view;

pub use columns::{ColumnDef, ColumnRegistry};
pub use error::{TableError, TableResult};
pub use export::{TableExport, export_file_name, slugify};
pub use paginator::{Paginator, format_row_count};
pub use predicate::{FilterValue, RowPredicate};
pub use sort::{SortDirection, SortSpec};
pub use view::{TableView, ViewState};
