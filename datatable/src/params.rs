//! Parameter snapshot shared with the host.

use std::fmt;

use log::warn;
use serde::Serialize;

use crate::error::TableError;
use crate::sort::{Direction, SortState};

/// Page size value standing for "show every row".
pub const ALL_ROWS: u64 = 999_999_999_999;

/// Fixed page sizes offered after the configured default.
const EXTRA_PAGE_SIZES: [u64; 2] = [50, 100];

/// One entry of the page-size menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    /// A fixed number of rows per page.
    Rows(u64),
    /// Every row on one page.
    All,
}

impl PageSize {
    /// The per-page value published to the host.
    pub fn value(self) -> u64 {
        match self {
            PageSize::Rows(n) => n,
            PageSize::All => ALL_ROWS,
        }
    }

    /// Maps a per-page value back to a menu entry.
    pub fn from_value(value: u64) -> Self {
        if value >= ALL_ROWS {
            PageSize::All
        } else {
            PageSize::Rows(value)
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(n) => write!(f, "{}", n),
            PageSize::All => f.write_str("All"),
        }
    }
}

/// The page-size menu: the configured default, 50, 100, then "All".
pub fn page_size_options(default: u64) -> Vec<PageSize> {
    let mut options = vec![PageSize::from_value(default)];
    for size in EXTRA_PAGE_SIZES.into_iter().map(PageSize::Rows) {
        if !options.contains(&size) {
            options.push(size);
        }
    }
    if !options.contains(&PageSize::All) {
        options.push(PageSize::All);
    }
    options
}

/// Validates a page number.
pub fn checked_page(page: i64) -> Result<u64, TableError> {
    u64::try_from(page)
        .ok()
        .filter(|&p| p >= 1)
        .ok_or(TableError::InvalidPage(page))
}

/// Validates a page size.
pub fn checked_per_page(per_page: i64) -> Result<u64, TableError> {
    u64::try_from(per_page)
        .ok()
        .filter(|&p| p >= 1)
        .ok_or(TableError::InvalidPageSize(per_page))
}

/// Page number, with non-positive values clamped to 1.
pub fn clamp_page(page: i64) -> u64 {
    checked_page(page).unwrap_or_else(|e| {
        warn!("{}; using 1", e);
        1
    })
}

/// Page size, with non-positive values clamped to 1.
pub fn clamp_per_page(per_page: i64) -> u64 {
    checked_per_page(per_page).unwrap_or_else(|e| {
        warn!("{}; using 1", e);
        1
    })
}

/// Complete snapshot of the widget's interactive state.
///
/// Serializes with the field names hosts expect in API calls: `key`, `page`,
/// `perPage`, and, once a sort has happened, `sortBy` and `sortDirection`.
///
/// `page` and `per_page` are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamState {
    key: String,
    page: u64,
    per_page: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_direction: Option<Direction>,
}

impl ParamState {
    /// Creates the mount-time state: empty key, page 1.
    pub fn new(per_page: u64) -> Self {
        Self {
            key: String::new(),
            page: 1,
            per_page: per_page.max(1),
            sort_by: None,
            sort_direction: None,
        }
    }

    /// The search key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current page, starting at 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Rows per page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The page-size menu entry matching `per_page`.
    pub fn page_size(&self) -> PageSize {
        PageSize::from_value(self.per_page)
    }

    /// Column key of the active sort.
    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    /// Direction of the active sort.
    pub fn sort_direction(&self) -> Option<Direction> {
        self.sort_direction
    }

    /// The sort facet, present after the first sort action.
    pub fn sort_state(&self) -> Option<SortState> {
        match (&self.sort_by, self.sort_direction) {
            (Some(by), Some(direction)) => Some(SortState::new(by.clone(), direction)),
            _ => None,
        }
    }

    /// Index of the first row of the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub(crate) fn set_key(&mut self, key: String) {
        self.key = key;
    }

    pub(crate) fn set_page(&mut self, page: u64) {
        self.page = clamp_page(i64::try_from(page).unwrap_or(i64::MAX));
    }

    pub(crate) fn set_per_page(&mut self, per_page: u64) {
        self.per_page = clamp_per_page(i64::try_from(per_page).unwrap_or(i64::MAX));
    }

    pub(crate) fn set_sort(&mut self, sort: SortState) {
        self.sort_by = Some(sort.sort_by);
        self.sort_direction = Some(sort.sort_direction);
    }
}
