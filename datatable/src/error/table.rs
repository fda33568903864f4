//! Degradations recognised by the widget core.
//!
//! None of these fail an operation. They are produced where the input is bad,
//! logged, and then degraded: an empty cell, an ignored click, or a value
//! clamped to 1.

/// A recoverable problem with widget input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Column key not present in a record and no value accessor supplied.
    #[error("Column '{key}' has no matching field and no value accessor")]
    InvalidColumnKey { key: String },

    /// Sort requested on an unknown or non-sortable column.
    #[error("Column '{key}' is not sortable")]
    InvalidSortKey { key: String },

    /// Page number below 1.
    #[error("Page {0} is not a positive integer")]
    InvalidPage(i64),

    /// Page size below 1.
    #[error("Page size {0} is not a positive integer")]
    InvalidPageSize(i64),
}

impl TableError {
    /// Creates a new invalid column key error.
    pub fn invalid_column_key(key: impl Into<String>) -> Self {
        Self::InvalidColumnKey { key: key.into() }
    }

    /// Creates a new invalid sort key error.
    pub fn invalid_sort_key(key: impl Into<String>) -> Self {
        Self::InvalidSortKey { key: key.into() }
    }
}
