//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::error::{GridError, Result};
use crate::record::Record;
use crate::value::CellValue;

/// Function deriving a cell value from a row.
pub type DeriveFn<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Function rendering a row's cell to display text.
pub type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a column reads its value from a row.
///
/// Resolved once when the column is built, so a cell read never probes
/// for an accessor.
pub enum Accessor<T> {
    /// Read a named field through [`Record::field`].
    Field(String),
    /// Compute the value from the whole row.
    Derived(DeriveFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Derived(f) => Accessor::Derived(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Column configuration.
///
/// Columns define what the table shows and what the query pipeline reads:
/// header text, the value accessor, an optional cell renderer, and whether
/// the column takes part in sorting and per-column filtering.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::field("name", "Name"),
///     Column::field("balance", "Balance"),
///     Column::derived("city", "City", |c: &Customer| c.address.city.clone().into()),
///     Column::field("active", "Active").status(),
/// ];
/// ```
pub struct Column<T> {
    /// Column key, used by filters and sort state.
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Value accessor.
    pub accessor: Accessor<T>,
    /// Optional cell renderer.
    pub cell: Option<CellFn<T>>,
    /// Whether this column is sortable.
    pub sortable: bool,
    /// Whether this column accepts a filter term.
    pub filterable: bool,
    /// Whether this column holds a toggleable status flag.
    pub status: bool,
}

impl<T: Record> Column<T> {
    /// Create a column reading the field with the same name as `key`.
    pub fn field(key: impl Into<String>, header: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_accessor(key.clone(), header, Accessor::Field(key))
    }

    /// Create a column whose value is computed from the row.
    pub fn derived<F>(key: impl Into<String>, header: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self::with_accessor(key, header, Accessor::Derived(Arc::new(derive)))
    }

    /// Start building a column whose accessor is supplied later.
    pub fn builder(key: impl Into<String>) -> ColumnBuilder<T> {
        ColumnBuilder::new(key)
    }

    fn with_accessor(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: Accessor<T>,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            accessor,
            cell: None,
            sortable: true,
            filterable: true,
            status: false,
        }
    }

    /// Set a cell renderer.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Exclude the column from sorting.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Exclude the column from per-column filtering.
    pub fn unfilterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Mark the column as a status flag with a toggle affordance.
    pub fn status(mut self) -> Self {
        self.status = true;
        self
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Accessor::Field(name) => row.field(name),
            Accessor::Derived(derive) => derive(row),
        }
    }

    /// Read this column's value as text for filtering and searching.
    pub fn text(&self, row: &T) -> String {
        self.value(row).to_string()
    }

    /// Render this column's cell for display.
    ///
    /// Uses the cell renderer when set, else the value's display text.
    pub fn render(&self, row: &T) -> String {
        match &self.cell {
            Some(render) => render(row),
            None => self.text(row),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            status: self.status,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("cell", &self.cell.is_some())
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("status", &self.status)
            .finish()
    }
}

/// Builder for columns assembled from separate pieces of configuration.
///
/// [`build`](ColumnBuilder::build) fails when no accessor was supplied.
pub struct ColumnBuilder<T> {
    key: String,
    header: Option<String>,
    accessor: Option<Accessor<T>>,
    cell: Option<CellFn<T>>,
    sortable: bool,
    filterable: bool,
    status: bool,
}

impl<T: Record> ColumnBuilder<T> {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
            accessor: None,
            cell: None,
            sortable: true,
            filterable: true,
            status: false,
        }
    }

    /// Set the header text. Defaults to the key.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Read the named field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.accessor = Some(Accessor::Field(name.into()));
        self
    }

    /// Compute the value from the row.
    pub fn derive<F>(mut self, derive: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Accessor::Derived(Arc::new(derive)));
        self
    }

    /// Set a cell renderer.
    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column accepts a filter term.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Mark the column as a status flag.
    pub fn status(mut self) -> Self {
        self.status = true;
        self
    }

    /// Finish the column.
    pub fn build(self) -> Result<Column<T>> {
        let Some(accessor) = self.accessor else {
            return Err(GridError::missing_accessor(self.key));
        };
        let header = self.header.unwrap_or_else(|| self.key.clone());
        Ok(Column {
            key: self.key,
            header,
            accessor,
            cell: self.cell,
            sortable: self.sortable,
            filterable: self.filterable,
            status: self.status,
        })
    }
}

/// Check a column set for duplicate keys.
pub(crate) fn validate_columns<T>(columns: &[Column<T>]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(GridError::duplicate_column(&column.key));
        }
    }
    Ok(())
}
