//! Pagination state for a table view.
//!
//! Pages are 1-indexed. Every request that could leave the valid range
//! is clamped into `[1, total_pages]` instead of failing.

use crate::constants::DEFAULT_PAGE_SIZE;
use serde::Serialize;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Paginator {
    /// Current page (1-indexed)
    current_page: usize,
    /// Rows per page, never zero
    page_size: usize,
    /// Number of rows being paged over
    total_rows: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(total_rows: usize, page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_rows,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// At least one page, even when there are no rows.
    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// Update the row count (after filtering) and re-clamp the current page.
    pub fn set_total_rows(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.set_page(self.current_page);
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    /// Change rows per page and go back to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.current_page = 1;
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn go_first(&mut self) {
        self.current_page = 1;
    }

    pub fn go_prev(&mut self) {
        if self.can_go_prev() {
            self.current_page -= 1;
        }
    }

    pub fn go_next(&mut self) {
        if self.can_go_next() {
            self.current_page += 1;
        }
    }

    pub fn go_last(&mut self) {
        self.current_page = self.total_pages();
    }

    /// Range of row positions shown on the current page
    pub fn visible_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_rows);
        let end = (start + self.page_size).min(self.total_rows);
        start..end
    }

    /// The current page's slice of `items`.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// "Showing X-Y of Z" footer text
    pub fn summary(&self) -> String {
        let range = self.visible_range();
        let showing_start = if self.total_rows == 0 { 0 } else { range.start + 1 };
        format!(
            "Showing {}-{} of {}",
            showing_start, range.end, self.total_rows
        )
    }
}

/// Format row count with a compact suffix (e.g., "1.2K rows")
pub fn format_row_count(count: usize) -> String {
    let formatted = if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    };

    if count == 1 {
        format!("{} row", formatted)
    } else {
        format!("{} rows", formatted)
    }
}
