//! Renderer-neutral snapshot of the widget.
//!
//! A UI layer draws a [`TableView`] however it likes; nothing here knows about
//! markup, terminals or styling.

use crate::model::Value;
use crate::params::PageSize;

/// Empty-state text while loading without custom content.
pub const LOADING_TEXT: &str = "Loading...";

/// Empty-state text when idle without custom content.
pub const NO_DATA_TEXT: &str = "No data available.";

/// Everything needed to draw the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// The header bar, when enabled.
    pub header: Option<HeaderBar>,
    /// Column headers in display order.
    pub columns: Vec<HeaderCell>,
    /// Select-all checkbox state, when checkboxes are enabled.
    pub select_all: Option<bool>,
    /// Displayed rows.
    pub rows: Vec<RowView>,
    /// Empty-state row, present when there are no rows.
    pub empty: Option<EmptyState>,
    /// Pager controls, when enabled.
    pub pager: Option<PagerView>,
}

/// The bar above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBar {
    /// Host content.
    pub elements: Option<String>,
    /// Loading indicator, shown only while loading.
    pub loader: Option<String>,
    /// Current text of the search box.
    pub search_text: String,
}

/// Sort indicator on a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable, but not the active sort column.
    Unsorted,
    Ascending,
    Descending,
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub text: String,
    pub sortable: bool,
    /// `None` for columns that cannot be sorted.
    pub indicator: Option<SortIndicator>,
}

/// One displayed row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Checkbox state, when checkboxes are enabled.
    pub selected: Option<bool>,
    pub cells: Vec<Value>,
}

/// The single row shown in place of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    /// Columns spanned, including the checkbox column.
    pub colspan: usize,
}

/// Pager controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub page: u64,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Page-size menu in display order.
    pub options: Vec<PageSize>,
    /// The entry matching the current page size.
    pub current: PageSize,
}
