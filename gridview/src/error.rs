//! Configuration errors for tables and columns.
//!
//! Only programming errors surface here. Data conditions (missing fields,
//! empty datasets, filters naming unknown columns) are handled inside the
//! engine and never produce an error.

/// Error type for table and column setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A column was built without a field accessor or a derivation.
    #[error("column '{column}' has neither a field accessor nor a derivation")]
    MissingAccessor { column: String },

    /// Two columns were registered under the same key.
    #[error("column '{column}' is registered more than once")]
    DuplicateColumn { column: String },

    /// The allowed page size set is empty or contains zero.
    #[error("page sizes must be a non-empty set of positive integers")]
    InvalidPageSizes,

    /// A page size outside the allowed set was requested.
    #[error("page size {size} is not one of the allowed sizes {allowed:?}")]
    PageSizeNotAllowed { size: usize, allowed: Vec<usize> },

    /// Row height must be positive.
    #[error("row height must be greater than zero")]
    ZeroRowHeight,
}

impl GridError {
    /// Creates a new missing accessor error.
    pub fn missing_accessor(column: impl Into<String>) -> Self {
        Self::MissingAccessor {
            column: column.into(),
        }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    /// Creates a new disallowed page size error.
    pub fn page_size_not_allowed(size: usize, allowed: &[usize]) -> Self {
        Self::PageSizeNotAllowed {
            size,
            allowed: allowed.to_vec(),
        }
    }
}

/// Result alias for fallible setup operations.
pub type Result<T> = std::result::Result<T, GridError>;
