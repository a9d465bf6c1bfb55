//! Plain-text rendering of a table view.

use crate::table::{TableView, format_row_count};
use crate::theme::ThemeContext;

/// Longest cell rendered before truncation
const MAX_CELL_WIDTH: usize = 40;

const COLUMN_GAP: &str = "  ";

/// Render the current page with headers, sort indicators and a footer.
pub fn render_table(view: &TableView, theme: &ThemeContext) -> String {
    let palette = theme.palette();
    let columns = view.visible_columns();
    let mut out = String::new();

    if columns.is_empty() {
        out.push_str(&format!("{}\n", theme.paint("No visible columns", palette.muted)));
        return out;
    }

    let headers: Vec<String> = columns
        .iter()
        .map(|c| match view.sort_indicator(&c.id) {
            Some(direction) => format!("{} {}", c.header, direction.indicator()),
            None => c.header.clone(),
        })
        .collect();

    let rows: Vec<Vec<String>> = view
        .page_rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    let text = row
                        .value(&c.accessor_key)
                        .map(|cell| cell.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    truncate(&text, MAX_CELL_WIDTH)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| theme.paint(&pad(h, w), palette.header))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(header_line.trim_end());
    out.push('\n');

    let rule = widths
        .iter()
        .map(|&w| "─".repeat(w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(&format!("{}\n", theme.paint(&rule, palette.muted)));

    if rows.is_empty() {
        out.push_str(&format!("{}\n", theme.paint("No data", palette.muted)));
    }
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{}\n", theme.paint(&render_footer(view), palette.muted)));
    out
}

/// `Showing 1-25 of 120 · page 1/5 · 2 filters · search "an"`
pub fn render_footer(view: &TableView) -> String {
    let mut parts = vec![
        view.summary(),
        format!("page {}/{}", view.current_page(), view.total_pages()),
    ];
    if view.filtered_count() != view.total_count() {
        parts.push(format!("{} total", format_row_count(view.total_count())));
    }
    match view.active_filter_count() {
        0 => {}
        1 => parts.push("1 filter".to_string()),
        n => parts.push(format!("{} filters", n)),
    }
    if !view.search_query().is_empty() {
        parts.push(format!("search \"{}\"", view.search_query()));
    }
    parts.join(" · ")
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
