//! Headless core of a tabular data widget.
//!
//! A UI layer draws rows and columns; this crate owns everything behind them:
//! the default search and sort, row selection, pagination, and the parameter
//! snapshot published to the host so it can page, sort or search remotely.

pub mod column;
pub mod config;
pub mod debounce;
pub mod error;
pub mod model;
pub mod negotiator;
pub mod params;
pub mod search;
pub mod selection;
pub mod sort;
pub mod view;

mod table;

pub use column::{CellAccessor, Column, ColumnSpec};
pub use config::DatatableConfig;
pub use debounce::{Debouncer, sleep_until_optional};
pub use error::{ConfigError, FieldError, RecordError, TableError};
pub use model::{Record, Value, records_from_json};
pub use negotiator::ParamNegotiator;
pub use params::{ALL_ROWS, PageSize, ParamState, page_size_options};
pub use search::{MatchPass, SearchResult, search, search_indices, search_with_pass};
pub use selection::{RowKey, SelectionSet, value_key};
pub use sort::{Direction, SortState, compare_values, sort, sort_in_place};
pub use table::*;
pub use view::{
    EmptyState, HeaderBar, HeaderCell, LOADING_TEXT, NO_DATA_TEXT, PagerView, RowView,
    SortIndicator, TableView,
};
