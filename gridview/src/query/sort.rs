//! Single-column sort state and stable sorting.

use std::fmt;

use crate::column::Column;
use crate::record::Record;
use crate::value::SortKey;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on a column.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on a column.
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Next sort state after the user toggles `column`.
    ///
    /// The same column cycles ascending, descending, unsorted. A different
    /// column starts at ascending.
    pub fn toggle(current: Option<&SortSpec>, column: &str) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(SortSpec::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(column)),
        }
    }
}

/// Stable-sort row indices by a column's natural ordering.
///
/// Sort keys are computed once per row. Descending order reverses the
/// comparator, so equal keys keep their incoming order either way.
/// Returns `false` and leaves `indices` untouched if the column is unknown.
pub(crate) fn sort_indices<T: Record>(
    rows: &[T],
    columns: &[Column<T>],
    indices: &mut Vec<usize>,
    spec: &SortSpec,
) -> bool {
    let Some(column) = columns.iter().find(|c| c.key == spec.column) else {
        log::debug!("Sort column '{}' is not registered, skipping sort", spec.column);
        return false;
    };

    let mut keyed: Vec<(usize, SortKey)> = indices
        .iter()
        .map(|&i| (i, column.value(&rows[i]).sort_key()))
        .collect();

    match spec.direction {
        SortDirection::Ascending => keyed.sort_by(|a, b| a.1.cmp(&b.1)),
        SortDirection::Descending => keyed.sort_by(|a, b| b.1.cmp(&a.1)),
    }

    indices.clear();
    indices.extend(keyed.into_iter().map(|(i, _)| i));
    true
}
