//! The view controller: mutable view state over a fixed set of rows.
//!
//! Every state change recomputes the derived row order in a fixed
//! pipeline: search, then column filters, then sort, then the page clamp.
//! Rows are shared behind an `Arc` and never mutated; the view only keeps
//! index lists into them.

use crate::constants::{DEFAULT_PAGE_SIZE, SLOW_OPERATION_MS};
use crate::perf::ScopedTimer;
use crate::profile_scope;
use crate::table::columns::{ColumnDef, ColumnRegistry};
use crate::table::error::{TableError, TableResult};
use crate::table::export::TableExport;
use crate::table::paginator::Paginator;
use crate::table::predicate::{FilterValue, RowPredicate};
use crate::table::sort::{SortDirection, SortSpec, next_sort, sort_indices};
use crate::types::{DataRow, DataSource};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Serializable snapshot of the user-facing view state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pub search_query: String,
    pub active_filters: BTreeMap<String, FilterValue>,
    pub sort: Option<SortSpec>,
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub hidden_columns: Vec<String>,
}

pub struct TableView {
    columns: ColumnRegistry,
    rows: Arc<[DataRow]>,
    search_query: String,
    /// Keyed by column id; only non-empty values are stored
    active_filters: BTreeMap<String, FilterValue>,
    sort: Option<SortSpec>,
    paginator: Paginator,
    /// Indices into `rows` after search, filters and sort
    filtered: Vec<usize>,
    slow_threshold_ms: f64,
}

impl TableView {
    pub fn new(columns: ColumnRegistry, rows: impl Into<Arc<[DataRow]>>) -> Self {
        let rows = rows.into();
        let mut view = Self {
            columns,
            filtered: (0..rows.len()).collect(),
            paginator: Paginator::new(rows.len(), DEFAULT_PAGE_SIZE),
            rows,
            search_query: String::new(),
            active_filters: BTreeMap::new(),
            sort: None,
            slow_threshold_ms: SLOW_OPERATION_MS,
        };
        view.recompute();
        view
    }

    /// View over a loaded source with one column per source column.
    pub fn from_source(source: DataSource) -> Self {
        let columns = ColumnRegistry::from_source(&source);
        Self::new(columns, source.rows)
    }

    pub fn with_page_size(mut self, items_per_page: usize) -> Self {
        self.set_items_per_page(items_per_page);
        self
    }

    pub fn with_slow_threshold(mut self, threshold_ms: f64) -> Self {
        self.slow_threshold_ms = threshold_ms;
        self
    }

    pub fn set_slow_threshold(&mut self, threshold_ms: f64) {
        self.slow_threshold_ms = threshold_ms;
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.recompute();
    }

    /// Set or replace one column's filter. An empty value clears it.
    pub fn set_column_filter(
        &mut self,
        column_id: &str,
        value: impl Into<FilterValue>,
    ) -> TableResult<()> {
        let column = self.columns.require(column_id)?;
        if !column.filterable {
            return Err(TableError::NotFilterable(column_id.to_string()));
        }

        let value = value.into();
        if value.is_active() {
            self.active_filters.insert(column_id.to_string(), value);
        } else {
            self.active_filters.remove(column_id);
        }
        self.recompute();
        Ok(())
    }

    pub fn clear_column_filter(&mut self, column_id: &str) -> TableResult<()> {
        self.columns.require(column_id)?;
        if self.active_filters.remove(column_id).is_some() {
            self.recompute();
        }
        Ok(())
    }

    /// Clear search, filters and sort, and go back to page 1.
    pub fn reset_filters(&mut self) {
        self.search_query.clear();
        self.active_filters.clear();
        self.sort = None;
        self.recompute();
        self.paginator.go_first();
    }

    /// Advance the column's sort through ascending, descending, unsorted.
    /// Returns the column's new direction.
    pub fn toggle_sort(&mut self, column_id: &str) -> TableResult<Option<SortDirection>> {
        self.ensure_sortable(column_id)?;
        self.sort = next_sort(self.sort.as_ref(), column_id);
        self.recompute();
        Ok(self.sort_indicator(column_id))
    }

    /// Replace the sort outright.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> TableResult<()> {
        if let Some(spec) = &sort {
            self.ensure_sortable(&spec.column_id)?;
        }
        self.sort = sort;
        self.recompute();
        Ok(())
    }

    /// Go to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        self.paginator.set_page(page);
    }

    pub fn first_page(&mut self) {
        self.paginator.go_first();
    }

    pub fn prev_page(&mut self) {
        self.paginator.go_prev();
    }

    pub fn next_page(&mut self) {
        self.paginator.go_next();
    }

    pub fn last_page(&mut self) {
        self.paginator.go_last();
    }

    /// Change rows per page (at least 1); resets to page 1.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.paginator.set_page_size(items_per_page);
    }

    /// Flip a column's visibility and return the new state.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> TableResult<bool> {
        self.columns.toggle_visibility(column_id)
    }

    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) -> TableResult<()> {
        self.columns.set_visible(column_id, visible)
    }

    // ------------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------------

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.columns.visible().collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.active_filters
    }

    pub fn active_filter_count(&self) -> usize {
        self.active_filters.len()
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Sort direction to show on `column_id`'s header, if it is the sorted column.
    pub fn sort_indicator(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|spec| spec.column_id == column_id)
            .map(|spec| spec.direction)
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn items_per_page(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Number of rows in the backing collection.
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Every row that passes search and filters, in sorted order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &DataRow> {
        self.filtered.iter().map(|&i| &self.rows[i])
    }

    /// Rows on the current page, in sorted order.
    pub fn page_rows(&self) -> Vec<&DataRow> {
        self.paginator
            .page_slice(&self.filtered)
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// "Showing X-Y of Z" over the filtered rows.
    pub fn summary(&self) -> String {
        self.paginator.summary()
    }

    /// All filtered rows over the visible columns.
    pub fn export(&self) -> TableExport {
        TableExport::build(&self.visible_columns(), self.filtered_rows())
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            search_query: self.search_query.clone(),
            active_filters: self.active_filters.clone(),
            sort: self.sort.clone(),
            current_page: self.current_page(),
            items_per_page: self.items_per_page(),
            total_pages: self.total_pages(),
            filtered_count: self.filtered_count(),
            hidden_columns: self
                .columns
                .iter()
                .filter(|c| !c.visible)
                .map(|c| c.id.clone())
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn ensure_sortable(&self, column_id: &str) -> TableResult<()> {
        if self.columns.require(column_id)?.sortable {
            Ok(())
        } else {
            Err(TableError::NotSortable(column_id.to_string()))
        }
    }

    /// Filters are stored by column id but evaluated by accessor key.
    /// Search covers every registered column, hidden ones included.
    fn predicate(&self) -> RowPredicate {
        let filters = self.active_filters.iter().map(|(id, value)| {
            let key = self
                .columns
                .get(id)
                .map(|c| c.accessor_key.clone())
                .unwrap_or_else(|| id.clone());
            (key, value.clone())
        });
        RowPredicate::new(&self.search_query, filters)
            .with_search_keys(self.columns.iter().map(|c| c.accessor_key.clone()))
    }

    fn recompute(&mut self) {
        let _timer = ScopedTimer::new("table_view::recompute", self.slow_threshold_ms);
        let predicate = self.predicate();
        let rows = &self.rows;

        let mut indices: Vec<usize> = {
            profile_scope!("table_view::search");
            (0..rows.len())
                .filter(|&i| predicate.matches_search(&rows[i]))
                .collect()
        };

        {
            profile_scope!("table_view::filter");
            indices.retain(|&i| predicate.matches_filters(&rows[i]));
        }

        if let Some(spec) = &self.sort {
            profile_scope!("table_view::sort");
            if let Some(column) = self.columns.get(&spec.column_id) {
                sort_indices(rows, &mut indices, &column.accessor_key, spec.direction);
            }
        }

        self.paginator.set_total_rows(indices.len());
        self.filtered = indices;

        tracing::debug!(
            total = self.rows.len(),
            filtered = self.filtered.len(),
            filters = predicate.active_filter_count(),
            sort = ?self.sort.as_ref().map(|s| (&s.column_id, s.direction)),
            page = self.paginator.current_page(),
            "Recomputed table view"
        );
    }
}
