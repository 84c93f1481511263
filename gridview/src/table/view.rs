//! Render snapshot of a table.

use crate::query::SortDirection;
use crate::virtualizer::VirtualWindow;

/// Header cell of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Whether the column has a filter input.
    pub filterable: bool,
    /// Sort direction shown on this column, if it is the sort column.
    pub sort: Option<SortDirection>,
    /// Text currently in this column's filter input.
    pub filter_input: String,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<T> {
    /// Position within the current page.
    pub index: usize,
    /// Row identity.
    pub id: String,
    /// Whether the row is selected.
    pub selected: bool,
    /// Rendered cell text, one per column.
    pub cells: Vec<String>,
    /// The row itself.
    pub row: T,
}

/// What the table body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Body<T> {
    /// Rows are being fetched; show a loading placeholder.
    Loading,
    /// Nothing to show; show a "no data found" placeholder.
    Empty,
    /// Rows inside the render window.
    Rows(Vec<ViewRow<T>>),
}

impl<T> Body<T> {
    /// Rendered rows, empty for placeholder states.
    pub fn rows(&self) -> &[ViewRow<T>] {
        match self {
            Body::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub page_sizes: Vec<usize>,
    pub total_pages: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<T> {
    pub headers: Vec<HeaderCell>,
    pub body: Body<T>,
    /// Render window with padding, absent while loading.
    pub window: Option<VirtualWindow>,
    pub page: PageInfo,
    /// Text currently in the global search box.
    pub global_input: String,
    /// Header checkbox: every filtered row is selected.
    pub all_selected: bool,
    /// Header checkbox: indeterminate.
    pub some_selected: bool,
    /// Number of reported selected rows.
    pub selected_count: usize,
    /// Rows passing the filters.
    pub filtered_count: usize,
    /// Rows in the source collection.
    pub total_count: usize,
}
