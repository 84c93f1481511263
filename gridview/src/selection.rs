//! Selection state management for tables.
//!
//! Selection uses string IDs for stability across filtering, sorting and
//! paging. Positions are never stored.

use std::collections::HashSet;

/// ID-based selection state.
///
/// Internally the set may briefly hold IDs whose rows have left the source
/// collection; everything reported outward goes through
/// [`reported`](Selection::reported), which intersects with the current
/// source IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection holding the given IDs.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check if an ID is selected.
    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Toggle selection of an ID.
    /// Returns true if the ID is now selected.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Toggle every row of the filtered result set.
    ///
    /// Clears the selection when all of `filtered_ids` are already selected,
    /// otherwise selects all of them. This covers the whole filtered set,
    /// not just the rows on the current page.
    pub fn toggle_all_visible(&mut self, filtered_ids: &[String]) {
        if self.is_all_selected(filtered_ids) {
            self.selected.clear();
        } else {
            self.selected.extend(filtered_ids.iter().cloned());
        }
    }

    /// Whether every ID in `filtered_ids` is selected.
    ///
    /// An empty filtered set is never "all selected".
    pub fn is_all_selected(&self, filtered_ids: &[String]) -> bool {
        !filtered_ids.is_empty() && filtered_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Whether some but not all of `filtered_ids` are selected.
    pub fn is_some_selected(&self, filtered_ids: &[String]) -> bool {
        filtered_ids.iter().any(|id| self.selected.contains(id))
            && !self.is_all_selected(filtered_ids)
    }

    /// Replace the selection.
    pub fn set_selected<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Selected IDs that still exist in the source collection, sorted.
    pub fn reported(&self, source_ids: &HashSet<String>) -> Vec<String> {
        let mut ids: Vec<_> = self
            .selected
            .iter()
            .filter(|id| source_ids.contains(*id))
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Drop IDs that are no longer in the source collection.
    /// Returns the IDs that were dropped.
    pub fn sync(&mut self, source_ids: &HashSet<String>) -> Vec<String> {
        let removed: Vec<_> = self
            .selected
            .iter()
            .filter(|id| !source_ids.contains(*id))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        if !removed.is_empty() {
            log::debug!("Selection dropped {} ids missing from source", removed.len());
        }
        removed
    }
}
