//! DataTable - a filtered, sorted, paginated and virtualized record table.
//!
//! Data flows through a fixed pipeline, recomputed only when an input
//! changes:
//!
//! ```text
//! rows -> filter (global fuzzy + column substring) -> sort -> page -> window
//! ```
//!
//! Selection runs beside the pipeline. It is keyed by row ID, so it survives
//! filtering, sorting and paging, and it is reported to the calling screen
//! only for IDs still present in the source rows.
//!
//! # Example
//!
//! ```ignore
//! use gridview::prelude::*;
//!
//! #[derive(Clone, Record)]
//! struct Customer {
//!     id: String,
//!     name: String,
//!     city: String,
//! }
//!
//! let columns = vec![
//!     Column::field("name", "Name"),
//!     Column::field("city", "City"),
//! ];
//! let table = DataTable::with_rows(columns, customers, TableConfig::default())?;
//! table.set_filter_input(FilterKey::column("city"), "lah");
//! ```

mod state;
mod view;

pub use state::{DataTable, SelectionCallback, StatusCallback, TableId};
pub use view::{Body, HeaderCell, PageInfo, TableView, ViewRow};
