//! Distinct values per filterable column, for filter autocompletion.

use std::collections::{BTreeMap, HashSet};

use crate::column::Column;
use crate::query::fuzzy_filter;
use crate::record::Record;
use crate::value::SortKey;

/// Distinct non-empty values of each filterable column, in natural order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctIndex {
    values: BTreeMap<String, Vec<String>>,
}

impl DistinctIndex {
    /// Index the given rows.
    pub fn build<T: Record>(rows: &[T], columns: &[Column<T>]) -> Self {
        let values = columns
            .iter()
            .filter(|c| c.filterable)
            .map(|column| (column.key.clone(), distinct_values(rows, column)))
            .collect();
        Self { values }
    }

    /// Distinct values of a column. Empty for unknown columns.
    pub fn values(&self, column: &str) -> &[String] {
        self.values.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys of the indexed columns.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Values of a column matching a partial input, best match first.
    ///
    /// An empty input returns the first `limit` values in natural order.
    pub fn suggestions(&self, column: &str, partial: &str, limit: usize) -> Vec<String> {
        let values = self.values(column);
        fuzzy_filter(partial, values)
            .into_iter()
            .take(limit)
            .map(|m| values[m.index].clone())
            .collect()
    }
}

fn distinct_values<T: Record>(rows: &[T], column: &Column<T>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keyed: Vec<(SortKey, String)> = Vec::new();
    for row in rows {
        let value = column.value(row);
        let text = value.to_string();
        if text.is_empty() || !seen.insert(text.clone()) {
            continue;
        }
        keyed.push((value.sort_key(), text));
    }
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, text)| text).collect()
}
