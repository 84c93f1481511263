//! The `Record` trait implemented by table rows.

use crate::value::CellValue;

/// Trait for values that can be shown as rows of a [`DataTable`](crate::DataTable).
///
/// A record exposes a stable identity, used for selection tracking, and
/// read access to its fields by name, used by [`Accessor::Field`](crate::Accessor)
/// columns. Fields the record does not have read as [`CellValue::Null`].
///
/// Usually derived:
///
/// ```
/// use gridview::Record;
///
/// #[derive(Clone, Record)]
/// struct Customer {
///     id: String,
///     name: String,
///     balance: i64,
/// }
///
/// let c = Customer { id: "7".into(), name: "Sana".into(), balance: 10 };
/// assert_eq!(c.id(), "7");
/// assert_eq!(c.field("name").to_string(), "Sana");
/// assert!(c.field("missing").is_null());
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Unique identifier for this row.
    ///
    /// Must stay the same across refetches of the same record.
    fn id(&self) -> String;

    /// Read a field by name.
    fn field(&self, name: &str) -> CellValue;
}
