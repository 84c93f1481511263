//! Data table state.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use crate::column::{Column, validate_columns};
use crate::config::TableConfig;
use crate::debounce::{Debouncer, FilterKey};
use crate::distinct::DistinctIndex;
use crate::error::{GridError, Result};
use crate::pagination::Pagination;
use crate::query::{self, Query, SortSpec};
use crate::record::Record;
use crate::selection::Selection;
use crate::virtualizer::{RowHeight, VirtualWindow, Virtualizer};

use super::view::{Body, HeaderCell, PageInfo, TableView, ViewRow};

/// Called with the reported selection after every change to it.
pub type SelectionCallback = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Called with a row ID and its current status when a status cell is toggled.
pub type StatusCallback = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__data_table_{}", self.0)
    }
}

/// Memoized query result, keyed on the revisions it was computed from.
#[derive(Debug, Default)]
struct Pipeline {
    key: Option<(u64, u64)>,
    /// Indices into `rows`, filtered and sorted.
    indices: Vec<usize>,
}

/// Internal state for the DataTable.
pub(super) struct DataTableInner<T: Record> {
    columns: Vec<Column<T>>,
    config: TableConfig,
    /// Source rows, replaced wholesale by the calling screen.
    rows: Vec<T>,
    source_ids: HashSet<String>,
    rows_revision: u64,
    query: Query,
    query_revision: u64,
    /// Raw filter input as typed, ahead of the debounced query.
    inputs: BTreeMap<FilterKey, String>,
    pipeline: Pipeline,
    pagination: Pagination,
    virtualizer: Virtualizer,
    selection: Selection,
    /// Last selection reported to the calling screen.
    reported: Vec<String>,
    loading: bool,
    disposed: bool,
    distinct: Option<(u64, DistinctIndex)>,
    on_selection_change: Option<SelectionCallback>,
    on_toggle_status: Option<StatusCallback>,
}

impl<T: Record> DataTableInner<T> {
    fn new(columns: Vec<Column<T>>, config: TableConfig) -> Self {
        let virtualizer = Virtualizer::new(
            RowHeight::Fixed(config.row_height),
            config.container_height,
            config.overscan,
        );
        Self {
            columns,
            pagination: Pagination::new(config.default_page_size),
            config,
            rows: Vec::new(),
            source_ids: HashSet::new(),
            rows_revision: 0,
            query: Query::new(),
            query_revision: 0,
            inputs: BTreeMap::new(),
            pipeline: Pipeline::default(),
            virtualizer,
            selection: Selection::new(),
            reported: Vec::new(),
            loading: false,
            disposed: false,
            distinct: None,
            on_selection_change: None,
            on_toggle_status: None,
        }
    }

    /// Bring the pipeline, page range and window up to date.
    fn refresh(&mut self) {
        let key = (self.rows_revision, self.query_revision);
        if self.pipeline.key != Some(key) {
            self.pipeline.indices = query::apply_indices(
                &self.rows,
                &self.columns,
                &self.query,
                self.config.fuzzy_min_score,
            );
            self.pipeline.key = Some(key);
        }
        self.pagination.set_item_count(self.pipeline.indices.len());
        self.virtualizer.set_row_count(self.pagination.range().len());
    }

    fn query_changed(&mut self) {
        self.query_revision += 1;
        self.virtualizer.reset();
        self.refresh();
    }

    fn page_changed(&mut self) {
        self.virtualizer.reset();
        self.refresh();
    }

    fn commit_filter(&mut self, key: &FilterKey, term: String) -> bool {
        let changed = match key {
            FilterKey::Global => self.query.set_global(term),
            FilterKey::Column(column) => self.query.set_column_filter(column.clone(), term),
        };
        if changed {
            log::debug!("Filter '{key}' committed");
            self.query_changed();
        }
        changed
    }

    fn filtered_ids(&self) -> Vec<String> {
        self.pipeline
            .indices
            .iter()
            .map(|&i| self.rows[i].id())
            .collect()
    }

    fn page_indices(&self) -> &[usize] {
        &self.pipeline.indices[self.pagination.range()]
    }

    fn sync_selection(&mut self) {
        if !self.loading {
            self.selection.sync(&self.source_ids);
        }
    }

    /// Recompute the reported selection; hand back the callback if it changed.
    fn take_selection_change(&mut self) -> Option<(SelectionCallback, Vec<String>)> {
        let reported = self.selection.reported(&self.source_ids);
        if reported == self.reported {
            return None;
        }
        self.reported = reported.clone();
        self.on_selection_change
            .clone()
            .map(|callback| (callback, reported))
    }

    fn view(&self) -> TableView<T> {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                header: column.header.clone(),
                sortable: column.sortable,
                filterable: column.filterable,
                sort: self
                    .query
                    .sort
                    .as_ref()
                    .filter(|spec| spec.column == column.key)
                    .map(|spec| spec.direction),
                filter_input: self
                    .inputs
                    .get(&FilterKey::Column(column.key.clone()))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        let filtered_ids = self.filtered_ids();
        let (body, window) = if self.loading {
            (Body::Loading, None)
        } else if filtered_ids.is_empty() {
            (Body::Empty, Some(self.virtualizer.window()))
        } else {
            let window = self.virtualizer.window();
            let page = self.page_indices();
            let rows = window
                .range
                .clone()
                .filter_map(|i| page.get(i).map(|&row_index| (i, &self.rows[row_index])))
                .map(|(index, row)| {
                    let id = row.id();
                    ViewRow {
                        index,
                        selected: self.selection.is_row_selected(&id),
                        id,
                        cells: self.columns.iter().map(|c| c.render(row)).collect(),
                        row: row.clone(),
                    }
                })
                .collect();
            (Body::Rows(rows), Some(window))
        };

        TableView {
            headers,
            body,
            window,
            page: PageInfo {
                page_index: self.pagination.page_index(),
                page_size: self.pagination.page_size(),
                page_sizes: self.config.page_sizes.clone(),
                total_pages: self.pagination.total_pages(),
                can_prev: self.pagination.can_prev(),
                can_next: self.pagination.can_next(),
            },
            global_input: self
                .inputs
                .get(&FilterKey::Global)
                .cloned()
                .unwrap_or_default(),
            all_selected: self.selection.is_all_selected(&filtered_ids),
            some_selected: self.selection.is_some_selected(&filtered_ids),
            selected_count: self.reported.len(),
            filtered_count: filtered_ids.len(),
            total_count: self.rows.len(),
        }
    }
}

/// A filtered, sorted, paginated and virtualized view over a row collection.
///
/// `DataTable<T>` manages:
/// - Global fuzzy search and per-column filters, debounced per input
/// - Single-column sort cycling ascending, descending, unsorted
/// - Pagination over the filtered rows
/// - Row virtualization of the current page
/// - Selection by row ID, reported as the intersection with the source rows
///
/// The handle is cheap to clone; clones share state. Dropping the last
/// handle, or calling [`dispose`](DataTable::dispose), cancels pending
/// filter timers.
///
/// # Example
///
/// ```ignore
/// let table = DataTable::with_rows(columns, customers, TableConfig::default())?
///     .on_selection_change(|ids| println!("selected: {ids:?}"));
/// table.set_filter_input(FilterKey::Global, "ah");
/// table.toggle_sort("name");
/// let view = table.view();
/// ```
pub struct DataTable<T: Record> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<DataTableInner<T>>>,
    /// Filter input timers.
    debouncer: Arc<Mutex<Debouncer<FilterKey>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T: Record> DataTable<T> {
    /// Create a table with column definitions.
    pub fn new(columns: Vec<Column<T>>, config: TableConfig) -> Result<Self> {
        config.validate()?;
        validate_columns(&columns)?;
        log::debug!(
            "Creating table with {} columns (page size {}, debounce {}ms)",
            columns.len(),
            config.default_page_size,
            config.debounce_ms
        );
        let debouncer = Debouncer::new(config.debounce_delay());
        Ok(Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(DataTableInner::new(columns, config))),
            debouncer: Arc::new(Mutex::new(debouncer)),
            dirty: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<Column<T>>, rows: Vec<T>, config: TableConfig) -> Result<Self> {
        let table = Self::new(columns, config)?;
        table.set_rows(rows);
        Ok(table)
    }

    /// Start with the given rows selected.
    pub fn with_selected_ids<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.set_selected(ids);
            let _ = guard.take_selection_change();
        }
        self
    }

    /// Observe the reported selection.
    pub fn on_selection_change<F>(self, callback: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_selection_change = Some(Arc::new(callback));
        }
        self
    }

    /// Observe status toggles.
    pub fn on_toggle_status<F>(self, callback: F) -> Self
    where
        F: Fn(&str, bool) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_toggle_status = Some(Arc::new(callback));
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Mutate state under the write lock. `None` if poisoned or disposed.
    fn update<R>(&self, f: impl FnOnce(&mut DataTableInner<T>) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        if guard.disposed {
            log::trace!("Ignoring update on disposed table {}", self.id);
            return None;
        }
        let result = f(&mut *guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }

    fn read<R: Default>(&self, f: impl FnOnce(&DataTableInner<T>) -> R) -> R {
        self.inner.read().map(|g| f(&g)).unwrap_or_default()
    }

    fn notify(change: Option<Option<(SelectionCallback, Vec<String>)>>) {
        if let Some(Some((callback, ids))) = change {
            callback(&ids);
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Get the table configuration.
    pub fn config(&self) -> TableConfig {
        self.read(|g| g.config.clone())
    }

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column<T>> {
        self.read(|g| g.columns.clone())
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replace the source rows.
    ///
    /// Filters, sort and selection are kept. The page index is reclamped and
    /// the selection drops IDs that are not in the new rows.
    pub fn set_rows(&self, rows: Vec<T>) {
        let change = self.update(|g| {
            log::debug!("Table {} rows {} -> {}", self.id, g.rows.len(), rows.len());
            g.source_ids = rows.iter().map(Record::id).collect();
            g.rows = rows;
            g.rows_revision += 1;
            g.sync_selection();
            g.refresh();
            g.take_selection_change()
        });
        Self::notify(change);
    }

    /// Get all source rows.
    pub fn rows(&self) -> Vec<T> {
        self.read(|g| g.rows.clone())
    }

    /// Get the number of source rows.
    pub fn len(&self) -> usize {
        self.read(|g| g.rows.len())
    }

    /// Check if the table has no source rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a source row by ID.
    pub fn find_row(&self, id: &str) -> Option<T> {
        self.read(|g| g.rows.iter().find(|row| row.id() == id).cloned())
    }

    /// Set the loading flag.
    ///
    /// While loading, the view shows a placeholder and row replacements do
    /// not prune the selection.
    pub fn set_loading(&self, loading: bool) {
        let change = self.update(|g| {
            g.loading = loading;
            g.sync_selection();
            g.take_selection_change()
        });
        Self::notify(change);
    }

    /// Whether the table is loading.
    pub fn is_loading(&self) -> bool {
        self.read(|g| g.loading)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Handle a keystroke in a filter input.
    ///
    /// The raw text is shown immediately through [`filter_input`](Self::filter_input);
    /// the query follows once the input has been idle for the debounce delay.
    pub fn set_filter_input(&self, key: FilterKey, raw: impl Into<String>) {
        let raw = raw.into();
        let echoed = self.update(|g| {
            if raw.is_empty() {
                g.inputs.remove(&key);
            } else {
                g.inputs.insert(key.clone(), raw.clone());
            }
        });
        if echoed.is_none() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        let commit_key = key.clone();
        let action = move || apply_debounced(&weak, &dirty, &commit_key, raw);
        if let Ok(mut debouncer) = self.debouncer.lock() {
            debouncer.schedule(key, action);
        }
    }

    /// Text currently in a filter input.
    pub fn filter_input(&self, key: &FilterKey) -> String {
        self.read(|g| g.inputs.get(key).cloned().unwrap_or_default())
    }

    /// Set the global search term now, skipping the debounce.
    pub fn set_global_filter(&self, term: impl Into<String>) {
        self.set_filter_now(FilterKey::Global, term.into());
    }

    /// Set a column filter now, skipping the debounce. Empty removes it.
    pub fn set_column_filter(&self, column: impl Into<String>, term: impl Into<String>) {
        self.set_filter_now(FilterKey::Column(column.into()), term.into());
    }

    fn set_filter_now(&self, key: FilterKey, term: String) {
        if let Ok(mut debouncer) = self.debouncer.lock() {
            debouncer.cancel(&key);
        }
        self.update(|g| {
            if term.is_empty() {
                g.inputs.remove(&key);
            } else {
                g.inputs.insert(key.clone(), term.clone());
            }
            g.commit_filter(&key, term);
        });
    }

    /// The committed global search term.
    pub fn global_filter(&self) -> String {
        self.read(|g| g.query.global.clone())
    }

    /// The committed filter term of a column.
    pub fn column_filter(&self, column: &str) -> Option<String> {
        self.read(|g| g.query.column_filters.get(column).cloned())
    }

    /// The committed query.
    pub fn query(&self) -> Query {
        self.read(|g| g.query.clone())
    }

    /// Clear every filter input and term, cancelling pending updates.
    pub fn reset_filters(&self) {
        if let Ok(mut debouncer) = self.debouncer.lock() {
            debouncer.cancel_all();
        }
        self.update(|g| {
            g.inputs.clear();
            if g.query.clear_filters() {
                g.query_changed();
            }
        });
    }

    /// Number of filter updates waiting on their debounce delay.
    pub fn pending_filter_updates(&self) -> usize {
        self.debouncer.lock().map(|d| d.pending()).unwrap_or(0)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state.
    pub fn sort(&self) -> Option<SortSpec> {
        self.read(|g| g.query.sort.clone())
    }

    /// Toggle sort for a column.
    ///
    /// The same column cycles ascending, descending, unsorted; another
    /// column starts ascending. Unknown or unsortable columns are ignored.
    /// Returns the new sort state.
    pub fn toggle_sort(&self, column: &str) -> Option<SortSpec> {
        self.update(|g| {
            if !g.columns.iter().any(|c| c.key == column && c.sortable) {
                log::debug!("Column '{column}' is not sortable");
                return g.query.sort.clone();
            }
            g.query.sort = SortSpec::toggle(g.query.sort.as_ref(), column);
            log::debug!("Sort on '{column}' is now {:?}", g.query.sort);
            g.query_changed();
            g.query.sort.clone()
        })
        .flatten()
    }

    /// Set or clear the sort.
    pub fn set_sort(&self, sort: Option<SortSpec>) {
        self.update(|g| {
            if g.query.sort != sort {
                g.query.sort = sort;
                g.query_changed();
            }
        });
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page index.
    pub fn page_index(&self) -> usize {
        self.read(|g| g.pagination.page_index())
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.read(|g| g.pagination.page_size())
    }

    /// Total number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.read(|g| g.pagination.total_pages())
    }

    /// Whether a previous page exists.
    pub fn can_prev(&self) -> bool {
        self.read(|g| g.pagination.can_prev())
    }

    /// Whether a next page exists.
    pub fn can_next(&self) -> bool {
        self.read(|g| g.pagination.can_next())
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&self, size: usize) -> Result<()> {
        let allowed = self.read(|g| g.config.page_sizes.clone());
        if !allowed.contains(&size) {
            return Err(GridError::page_size_not_allowed(size, &allowed));
        }
        self.update(|g| {
            if g.pagination.set_page_size(size) {
                g.page_changed();
            }
        });
        Ok(())
    }

    /// Go to a page, clamped into range. Returns true if the page changed.
    pub fn set_page_index(&self, index: usize) -> bool {
        self.paginate(|p| p.set_page_index(index))
    }

    /// Go to the next page.
    pub fn next_page(&self) -> bool {
        self.paginate(|p| p.next())
    }

    /// Go to the previous page.
    pub fn previous_page(&self) -> bool {
        self.paginate(|p| p.previous())
    }

    /// Go to the first page.
    pub fn first_page(&self) -> bool {
        self.paginate(|p| p.first())
    }

    /// Go to the last page.
    pub fn last_page(&self) -> bool {
        self.paginate(|p| p.last())
    }

    fn paginate(&self, f: impl FnOnce(&mut Pagination) -> bool) -> bool {
        self.update(|g| {
            let moved = f(&mut g.pagination);
            if moved {
                g.page_changed();
            }
            moved
        })
        .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Results
    // -------------------------------------------------------------------------

    /// Number of rows passing the filters.
    pub fn filtered_count(&self) -> usize {
        self.read(|g| g.pipeline.indices.len())
    }

    /// IDs of rows passing the filters, in display order.
    pub fn filtered_ids(&self) -> Vec<String> {
        self.read(|g| g.filtered_ids())
    }

    /// Rows passing the filters, in display order.
    pub fn filtered_rows(&self) -> Vec<T> {
        self.read(|g| {
            g.pipeline
                .indices
                .iter()
                .map(|&i| g.rows[i].clone())
                .collect()
        })
    }

    /// Rows on the current page, in display order.
    pub fn page_rows(&self) -> Vec<T> {
        self.read(|g| g.page_indices().iter().map(|&i| g.rows[i].clone()).collect())
    }

    // -------------------------------------------------------------------------
    // Virtualization
    // -------------------------------------------------------------------------

    /// Render window for the current page and scroll position.
    pub fn window(&self) -> VirtualWindow {
        self.inner
            .read()
            .map(|g| g.virtualizer.window())
            .unwrap_or(VirtualWindow {
                range: 0..0,
                padding_top: 0,
                padding_bottom: 0,
                total_height: 0,
            })
    }

    /// Current scroll offset of the row container.
    pub fn scroll_offset(&self) -> u64 {
        self.read(|g| g.virtualizer.scroll_offset())
    }

    /// Set the scroll offset (called on scroll events).
    pub fn set_scroll_offset(&self, offset: u64) -> bool {
        self.update(|g| g.virtualizer.set_scroll_offset(offset))
            .unwrap_or(false)
    }

    /// Scroll by a signed delta.
    pub fn scroll_by(&self, delta: i64) -> bool {
        self.update(|g| g.virtualizer.scroll_by(delta))
            .unwrap_or(false)
    }

    /// Scroll to make a row of the current page visible.
    pub fn scroll_to_row(&self, index: usize) -> bool {
        self.update(|g| g.virtualizer.scroll_to_index(index))
            .unwrap_or(false)
    }

    /// Set the scroll container height (called on resize).
    pub fn set_container_height(&self, height: u32) {
        self.update(|g| g.virtualizer.set_container_height(height));
    }

    /// Replace the row height estimate.
    pub fn set_row_height(&self, row_height: RowHeight) {
        self.update(|g| g.virtualizer.set_row_height(row_height));
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggle selection of a row by ID.
    /// Returns true if the row is now selected.
    pub fn toggle_row(&self, id: &str) -> bool {
        let result = self.update(|g| {
            let selected = g.selection.toggle_row(id);
            (selected, g.take_selection_change())
        });
        match result {
            Some((selected, change)) => {
                Self::notify(Some(change));
                selected
            }
            None => false,
        }
    }

    /// Select every filtered row, or clear if all are already selected.
    ///
    /// Applies to the whole filtered result, not only the current page.
    pub fn toggle_all_visible(&self) {
        let change = self.update(|g| {
            let filtered = g.filtered_ids();
            g.selection.toggle_all_visible(&filtered);
            g.take_selection_change()
        });
        Self::notify(change);
    }

    /// Check if a row is selected by ID.
    pub fn is_row_selected(&self, id: &str) -> bool {
        self.read(|g| g.selection.is_row_selected(id))
    }

    /// Whether every filtered row is selected.
    pub fn is_all_selected(&self) -> bool {
        self.read(|g| g.selection.is_all_selected(&g.filtered_ids()))
    }

    /// Whether some but not all filtered rows are selected.
    pub fn is_some_selected(&self) -> bool {
        self.read(|g| g.selection.is_some_selected(&g.filtered_ids()))
    }

    /// Selected IDs present in the source rows, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        self.read(|g| g.selection.reported(&g.source_ids))
    }

    /// Selected source rows, in source order.
    pub fn selected_rows(&self) -> Vec<T> {
        self.read(|g| {
            g.rows
                .iter()
                .filter(|row| g.selection.is_row_selected(&row.id()))
                .cloned()
                .collect()
        })
    }

    /// Replace the selection (controlled selection from the calling screen).
    pub fn set_selected_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let change = self.update(|g| {
            g.selection.set_selected(ids);
            g.take_selection_change()
        });
        Self::notify(change);
    }

    /// Clear all selection.
    pub fn clear_selection(&self) {
        let change = self.update(|g| {
            g.selection.clear();
            g.take_selection_change()
        });
        Self::notify(change);
    }

    // -------------------------------------------------------------------------
    // Status cells
    // -------------------------------------------------------------------------

    /// Activate the toggle of a status cell.
    ///
    /// Calls the status callback with the row ID and the cell's current
    /// value. Nothing is stored; the calling screen persists the change and
    /// refreshes the rows. Returns true if the callback was invoked.
    pub fn toggle_status(&self, id: &str, column: &str) -> bool {
        let call = self.read(|g| {
            let column = g.columns.iter().find(|c| c.key == column && c.status)?;
            let row = g.rows.iter().find(|row| row.id() == id)?;
            let callback = g.on_toggle_status.clone()?;
            Some((callback, column.value(row).is_truthy()))
        });
        match call {
            Some((callback, current)) => {
                callback(id, current);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Distinct values
    // -------------------------------------------------------------------------

    fn with_distinct<R: Default>(&self, f: impl FnOnce(&DistinctIndex) -> R) -> R {
        let Ok(mut guard) = self.inner.write() else {
            return R::default();
        };
        let revision = guard.rows_revision;
        if guard.distinct.as_ref().map(|(rev, _)| *rev) != Some(revision) {
            let index = DistinctIndex::build(&guard.rows, &guard.columns);
            guard.distinct = Some((revision, index));
        }
        guard
            .distinct
            .as_ref()
            .map(|(_, index)| f(index))
            .unwrap_or_default()
    }

    /// Distinct values of a filterable column, in natural order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        self.with_distinct(|index| index.values(column).to_vec())
    }

    /// Autocomplete suggestions for a column filter input.
    pub fn suggestions(&self, column: &str, partial: &str, limit: usize) -> Vec<String> {
        self.with_distinct(|index| index.suggestions(column, partial, limit))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Snapshot of everything the rendering surface shows.
    pub fn view(&self) -> TableView<T> {
        let Ok(guard) = self.inner.read() else {
            log::warn!("Table {} state is poisoned", self.id);
            return DataTableInner::new(Vec::new(), TableConfig::default()).view();
        };
        guard.view()
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Cancel pending filter timers and stop accepting updates.
    pub fn dispose(&self) {
        if let Ok(mut debouncer) = self.debouncer.lock() {
            debouncer.cancel_all();
        }
        if let Ok(mut guard) = self.inner.write() {
            guard.disposed = true;
        }
        log::debug!("Table {} disposed", self.id);
    }

    /// Whether [`dispose`](Self::dispose) was called.
    pub fn is_disposed(&self) -> bool {
        self.read(|g| g.disposed)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

/// Timer action: commit a debounced term to the table, if it still exists.
fn apply_debounced<T: Record>(
    inner: &Weak<RwLock<DataTableInner<T>>>,
    dirty: &AtomicBool,
    key: &FilterKey,
    term: String,
) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let Ok(mut guard) = inner.write() else {
        return;
    };
    if guard.disposed {
        return;
    }
    // A timer that already fired cannot be aborted; drop it if the input moved on.
    let current = guard.inputs.get(key).map(String::as_str).unwrap_or_default();
    if current != term {
        log::trace!("Dropping stale filter '{key}' commit");
        return;
    }
    if guard.commit_filter(key, term) {
        dirty.store(true, Ordering::SeqCst);
    }
}

impl<T: Record> Clone for DataTable<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            debouncer: Arc::clone(&self.debouncer),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Record> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("DataTable");
        s.field("id", &self.id);
        if let Ok(guard) = self.inner.read() {
            s.field("rows", &guard.rows.len())
                .field("filtered", &guard.pipeline.indices.len())
                .field("query", &guard.query)
                .field("pagination", &guard.pagination)
                .field("selected", &guard.reported.len())
                .field("loading", &guard.loading);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, gridview_derive::Record)]
    struct City {
        id: String,
        name: String,
    }

    fn cities() -> DataTable<City> {
        let rows = ["Lahore", "Karachi", "Quetta"]
            .iter()
            .enumerate()
            .map(|(i, name)| City {
                id: i.to_string(),
                name: name.to_string(),
            })
            .collect();
        DataTable::with_rows(vec![Column::field("name", "Name")], rows, TableConfig::default())
            .unwrap()
    }

    #[test]
    fn test_stale_timer_after_explicit_set_is_dropped() {
        let table = cities();
        let key = FilterKey::column("name");
        table.set_column_filter("name", "lahore");

        apply_debounced(&Arc::downgrade(&table.inner), &table.dirty, &key, "karachi".into());
        assert_eq!(table.column_filter("name"), Some("lahore".to_string()));
        assert_eq!(table.filtered_ids(), vec!["0".to_string()]);
    }

    #[test]
    fn test_stale_timer_after_reset_is_dropped() {
        let table = cities();
        let key = FilterKey::Global;
        table.reset_filters();

        apply_debounced(&Arc::downgrade(&table.inner), &table.dirty, &key, "quetta".into());
        assert_eq!(table.global_filter(), "");
        assert_eq!(table.filtered_count(), 3);
    }

    #[test]
    fn test_current_timer_commits() {
        let table = cities();
        let key = FilterKey::Global;
        if let Ok(mut guard) = table.inner.write() {
            guard.inputs.insert(key.clone(), "quetta".to_string());
        }

        apply_debounced(&Arc::downgrade(&table.inner), &table.dirty, &key, "quetta".into());
        assert_eq!(table.global_filter(), "quetta");
        assert_eq!(table.filtered_ids(), vec!["2".to_string()]);
        assert_eq!(table.filter_input(&key), "quetta");
    }
}
