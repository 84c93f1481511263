extern crate self as gridview;

pub mod column;
pub mod config;
pub mod debounce;
pub mod distinct;
pub mod error;
pub mod pagination;
pub mod query;
pub mod record;
pub mod selection;
pub mod table;
pub mod value;
pub mod virtualizer;

pub use column::{Accessor, Column, ColumnBuilder};
pub use config::TableConfig;
pub use debounce::{Debouncer, FilterKey};
pub use distinct::DistinctIndex;
pub use error::{GridError, Result};
pub use gridview_derive::Record;
pub use pagination::{PageSlice, Pagination};
pub use query::{Query, SortDirection, SortSpec};
pub use record::Record;
pub use selection::Selection;
pub use table::{Body, DataTable, TableId, TableView, ViewRow};
pub use value::CellValue;
pub use virtualizer::{RowHeight, VirtualWindow, Virtualizer};

pub mod prelude {
    pub use crate::column::{Column, ColumnBuilder};
    pub use crate::config::TableConfig;
    pub use crate::debounce::FilterKey;
    pub use crate::error::GridError;
    pub use crate::query::{SortDirection, SortSpec};
    pub use crate::record::Record;
    pub use crate::table::{Body, DataTable, TableView, ViewRow};
    pub use crate::value::CellValue;
    pub use crate::virtualizer::RowHeight;

    pub use gridview_derive::Record;
}
