//! Query engine: global fuzzy search, per-column filters and sort.
//!
//! The engine is a pure function of its inputs. It never touches the row
//! collection; it returns indices into it (or references to its rows) in
//! display order.

mod fuzzy;
mod sort;

use std::collections::BTreeMap;

use crate::column::Column;
use crate::record::Record;

pub use fuzzy::{FilterMatch, FuzzyRanker, fuzzy_filter};
pub use sort::{SortDirection, SortSpec};

/// Filter and sort state fed to the query engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Global search term, fuzzy matched against all columns.
    pub global: String,
    /// Per-column substring terms. Never holds empty terms.
    pub column_filters: BTreeMap<String, String>,
    /// Active sort, if any.
    pub sort: Option<SortSpec>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global search term.
    pub fn global(mut self, term: impl Into<String>) -> Self {
        self.set_global(term);
        self
    }

    /// Add a column filter.
    pub fn filter(mut self, column: impl Into<String>, term: impl Into<String>) -> Self {
        self.set_column_filter(column, term);
        self
    }

    /// Set the sort.
    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    /// Set the global search term. Returns true if it changed.
    pub fn set_global(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.global == term {
            return false;
        }
        self.global = term;
        true
    }

    /// Set or remove a column filter. Returns true if it changed.
    ///
    /// An empty term removes the column's predicate.
    pub fn set_column_filter(
        &mut self,
        column: impl Into<String>,
        term: impl Into<String>,
    ) -> bool {
        let column = column.into();
        let term = term.into();
        if term.is_empty() {
            return self.column_filters.remove(&column).is_some();
        }
        if self.column_filters.get(&column) == Some(&term) {
            return false;
        }
        self.column_filters.insert(column, term);
        true
    }

    /// Remove every filter term, keeping the sort.
    pub fn clear_filters(&mut self) -> bool {
        let had_filters = !self.global.is_empty() || !self.column_filters.is_empty();
        self.global.clear();
        self.column_filters.clear();
        had_filters
    }

    /// Whether any filter term is active.
    pub fn is_filtered(&self) -> bool {
        !self.global.is_empty() || !self.column_filters.is_empty()
    }
}

/// Run the query and return matching row indices in display order.
pub fn apply_indices<T: Record>(
    rows: &[T],
    columns: &[Column<T>],
    query: &Query,
    min_score: u32,
) -> Vec<usize> {
    let mut indices = filter_indices(rows, columns, query, min_score);
    if let Some(spec) = &query.sort {
        sort::sort_indices(rows, columns, &mut indices, spec);
    }
    log::trace!(
        "Query matched {} of {} rows (global: {:?}, column filters: {}, sort: {:?})",
        indices.len(),
        rows.len(),
        query.global,
        query.column_filters.len(),
        query.sort
    );
    indices
}

/// Run the query and return matching rows in display order.
///
/// # Example
///
/// ```ignore
/// let query = Query::new().global("ah").sort(SortSpec::ascending("name"));
/// let visible = apply(&customers, &columns, &query);
/// ```
pub fn apply<'a, T: Record>(rows: &'a [T], columns: &[Column<T>], query: &Query) -> Vec<&'a T> {
    apply_indices(rows, columns, query, 0)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

fn filter_indices<T: Record>(
    rows: &[T],
    columns: &[Column<T>],
    query: &Query,
    min_score: u32,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    if rows.is_empty() {
        return indices;
    }

    // Column filters: case-insensitive substring, AND-composed.
    for (key, term) in &query.column_filters {
        if term.is_empty() {
            continue;
        }
        let Some(column) = columns.iter().find(|c| &c.key == key) else {
            log::debug!("Filter on unregistered column '{key}' matches nothing");
            return Vec::new();
        };
        let needle = term.to_lowercase();
        indices.retain(|&i| column.text(&rows[i]).to_lowercase().contains(&needle));
        if indices.is_empty() {
            return indices;
        }
    }

    // Global search: fuzzy rank over the concatenated column text.
    if !query.global.is_empty() {
        let mut ranker = FuzzyRanker::new(&query.global, min_score);
        indices.retain(|&i| ranker.passes(&row_text(columns, &rows[i])));
    }

    indices
}

/// Concatenated text of all columns of a row, as searched by the global term.
pub fn row_text<T: Record>(columns: &[Column<T>], row: &T) -> String {
    columns
        .iter()
        .map(|c| c.text(row))
        .collect::<Vec<_>>()
        .join(" ")
}
