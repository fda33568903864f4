//! The datatable widget core.
//!
//! `Datatable` holds the host's rows, the columns, and all interactive state.
//! User actions come in through its methods; results go out through the
//! optional host callbacks and through [`Datatable::view`].
//!
//! Every host callback is optional. Without a search handler the default
//! [`search`](crate::search::search) filters the displayed rows once the
//! debounce window settles; without a sort handler the default
//! [`sort`](crate::sort::sort) orders them. Callbacks run synchronously inside
//! the method that triggered them and cannot call back into the table; a host
//! that wants to replace the data does so with [`Datatable::set_data`] after
//! the call returns.

use std::fmt;

use log::{debug, trace};
use tokio::time::Instant;

use crate::column::Column;
use crate::config::DatatableConfig;
use crate::debounce::Debouncer;
use crate::error::TableError;
use crate::model::Record;
use crate::negotiator::ParamNegotiator;
use crate::params::{PageSize, ParamState, page_size_options};
use crate::search::search;
use crate::selection::{RowKey, SelectionSet};
use crate::sort::{Direction, SortState, sort_in_place};
use crate::view::{
    EmptyState, HeaderBar, HeaderCell, LOADING_TEXT, NO_DATA_TEXT, PagerView, RowView,
    SortIndicator, TableView,
};

/// Host search override: `(query, full data)`.
pub type SearchHandler = Box<dyn FnMut(&str, &[Record])>;

/// Host sort override: `(column key, new direction, full sort state)`.
pub type SortHandler = Box<dyn FnMut(&str, Direction, &SortState)>;

/// Host selection sink, receiving the full selection on every change.
pub type SelectionHandler = Box<dyn FnMut(&[Record])>;

/// A tabular data widget without a renderer.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use datatable::{Column, Datatable, DatatableConfig, Direction, Record};
///
/// let published = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&published);
///
/// let mut table = Datatable::new(
///     DatatableConfig::default().with_pagination(true),
///     vec![Column::new("id").sortable(), Column::new("name").label("Name")],
/// )
/// .on_params_change(move |params| sink.borrow_mut().push(params.clone()));
///
/// table.set_data(vec![
///     Record::new().set("id", 1).set("name", "Alice"),
///     Record::new().set("id", 2).set("name", "bob"),
/// ]);
/// table.mount();
/// table.sort_click("id");
///
/// assert_eq!(table.params().sort_direction(), Some(Direction::Desc));
/// assert_eq!(table.displayed()[0].get_int("id").unwrap(), Some(2));
/// assert_eq!(published.borrow().len(), 2);
/// ```
pub struct Datatable {
    config: DatatableConfig,
    columns: Vec<Column>,
    data: Vec<Record>,
    displayed: Vec<Record>,
    search_text: String,
    negotiator: ParamNegotiator,
    selection: SelectionSet,
    debouncer: Debouncer<String>,
    search_handler: Option<SearchHandler>,
    sort_handler: Option<SortHandler>,
    selection_handler: Option<SelectionHandler>,
    disposed: bool,
}

impl Datatable {
    /// Create a table with explicit columns.
    pub fn new(config: DatatableConfig, columns: Vec<Column>) -> Self {
        Self {
            negotiator: ParamNegotiator::new(config.per_page()),
            debouncer: Debouncer::new(config.search_debounce()),
            config,
            columns,
            data: Vec::new(),
            displayed: Vec::new(),
            search_text: String::new(),
            selection: SelectionSet::new(),
            search_handler: None,
            sort_handler: None,
            selection_handler: None,
            disposed: false,
        }
    }

    /// Create a table whose columns come from the configuration.
    pub fn from_config(config: DatatableConfig) -> Self {
        let columns = config.columns.iter().cloned().map(Column::from).collect();
        Self::new(config, columns)
    }

    // -------------------------------------------------------------------------
    // Host callbacks
    // -------------------------------------------------------------------------

    /// Let the host own search. Disables the default search and its debounce.
    pub fn on_search(mut self, handler: impl FnMut(&str, &[Record]) + 'static) -> Self {
        self.search_handler = Some(Box::new(handler));
        self.refresh();
        self
    }

    /// Let the host own sorting. Disables the default sort.
    pub fn on_sort(mut self, handler: impl FnMut(&str, Direction, &SortState) + 'static) -> Self {
        self.sort_handler = Some(Box::new(handler));
        self.refresh();
        self
    }

    /// Receive the full parameter snapshot on every change.
    pub fn on_params_change(mut self, sink: impl FnMut(&ParamState) + 'static) -> Self {
        self.negotiator.set_sink(sink);
        self
    }

    /// Receive the full selection on every change.
    pub fn on_selection_change(mut self, handler: impl FnMut(&[Record]) + 'static) -> Self {
        self.selection_handler = Some(Box::new(handler));
        self
    }

    /// Identify rows with `key_fn` instead of by value. Clears the selection.
    pub fn with_row_key(mut self, key_fn: impl Fn(&Record) -> RowKey + 'static) -> Self {
        self.selection = SelectionSet::with_key(key_fn);
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Publish the initial parameters so the host can load the first page.
    pub fn mount(&mut self) {
        if self.disposed {
            return;
        }
        debug!("Mounting datatable with {} rows", self.data.len());
        self.refresh();
        self.negotiator.publish();
    }

    /// Tear the widget down: cancel the pending search and drop every host
    /// callback. A disposed table never calls the host again.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(key) = self.debouncer.cancel() {
            debug!("Dropping unsettled search {:?} on dispose", key);
        }
        self.negotiator.detach();
        self.search_handler = None;
        self.sort_handler = None;
        self.selection_handler = None;
        self.disposed = true;
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the host rows.
    ///
    /// Selected rows that no longer exist are dropped from the selection.
    pub fn set_data(&mut self, data: Vec<Record>) {
        self.data = data;
        self.refresh();
        if self.selection.retain_present(&self.data) {
            self.notify_selection();
        }
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.config.loading = loading;
    }

    /// The host rows.
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    /// The rows on display after default search, sort and paging.
    pub fn displayed(&self) -> &[Record] {
        &self.displayed
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &DatatableConfig {
        &self.config
    }

    /// The current parameter snapshot.
    pub fn params(&self) -> &ParamState {
        self.negotiator.state()
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// The search box changed.
    ///
    /// With a host search handler the handler runs immediately with the full
    /// data. Otherwise the key settles after the debounce window; see
    /// [`poll_timers`](Self::poll_timers).
    pub fn search_input(&mut self, query: &str) {
        if self.disposed {
            return;
        }
        self.search_text = query.to_string();

        if let Some(handler) = self.search_handler.as_mut() {
            debug!("Host search for {:?}", query);
            handler(query, &self.data);
            return;
        }

        self.debouncer.schedule(query.to_string(), Instant::now());
        if self.debouncer.window().is_zero() {
            self.poll_timers();
        }
    }

    /// When the pending search settles, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Settle the pending search if its window has elapsed. Returns `true`
    /// if a search settled.
    pub fn poll_timers(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let Some(key) = self.debouncer.poll(Instant::now()) else {
            return false;
        };
        debug!("Search settled on {:?}", key);
        self.negotiator.set_key(key);
        self.refresh();
        true
    }

    /// Current text of the search box.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// A column header's sort button was clicked.
    ///
    /// Returns the new sort state, or `None` when the column is unknown or
    /// not sortable.
    pub fn sort_click(&mut self, column_key: &str) -> Option<SortState> {
        if self.disposed {
            return None;
        }
        if let Err(e) = self.sortable_column(column_key) {
            debug!("Ignoring sort click: {}", e);
            return None;
        }

        let state = self.negotiator.toggle_sort(column_key);
        match self.sort_handler.as_mut() {
            Some(handler) => {
                debug!("Host sort {} {}", state.sort_by, state.sort_direction);
                handler(&state.sort_by, state.sort_direction, &state);
            }
            None => self.refresh(),
        }
        Some(state)
    }

    fn sortable_column(&self, key: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|column| column.key == key && column.sortable)
            .ok_or_else(|| TableError::invalid_sort_key(key))
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// "Previous" was clicked. No-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.negotiator.previous_page();
        if changed {
            self.refresh();
        }
        changed
    }

    /// "Next" was clicked. No-op while nothing is displayed.
    pub fn next_page(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.negotiator.next_page(!self.displayed.is_empty());
        if changed {
            self.refresh();
        }
        changed
    }

    /// Jump to a page; values below 1 are clamped to 1.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.negotiator.set_page(page);
        if changed {
            self.refresh();
        }
        changed
    }

    /// A page-size menu entry was chosen.
    pub fn select_page_size(&mut self, size: PageSize) -> bool {
        if self.disposed {
            return false;
        }
        let changed = self.negotiator.set_page_size(size);
        if changed {
            self.refresh();
        }
        changed
    }

    /// The page-size menu.
    pub fn page_size_options(&self) -> Vec<PageSize> {
        page_size_options(self.config.per_page())
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The checkbox of displayed row `index` was clicked.
    ///
    /// Returns `true` if the row is now selected. Ignored without checkboxes
    /// or for an index past the displayed rows.
    pub fn toggle_row(&mut self, index: usize) -> bool {
        if self.disposed || !self.config.checkbox {
            return false;
        }
        let Some(record) = self.displayed.get(index) else {
            trace!("Ignoring toggle of row {} past the displayed rows", index);
            return false;
        };
        let selected = self.selection.toggle(record);
        self.notify_selection();
        selected
    }

    /// The select-all checkbox was clicked. Returns `true` if every displayed
    /// row is now selected.
    pub fn toggle_all(&mut self) -> bool {
        if self.disposed || !self.config.checkbox {
            return false;
        }
        let all = self.selection.toggle_all(&self.displayed);
        self.notify_selection();
        all
    }

    /// Selected rows in selection order.
    pub fn selected(&self) -> Vec<Record> {
        self.selection.selected()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    fn notify_selection(&mut self) {
        if let Some(handler) = self.selection_handler.as_mut() {
            let rows = self.selection.selected();
            debug!("Publishing selection of {} rows", rows.len());
            handler(&rows);
        }
    }

    // -------------------------------------------------------------------------
    // Display
    // -------------------------------------------------------------------------

    fn refresh(&mut self) {
        let params = self.negotiator.state();

        let mut rows = if self.search_handler.is_none() && !params.key().is_empty() {
            search(&self.data, params.key())
        } else {
            self.data.clone()
        };

        if self.sort_handler.is_none()
            && let Some(sort) = params.sort_state()
        {
            sort_in_place(&mut rows, &sort.sort_by, sort.sort_direction);
        }

        if self.config.client_paging {
            let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
            let per_page = usize::try_from(params.per_page()).unwrap_or(usize::MAX);
            rows = rows.into_iter().skip(offset).take(per_page).collect();
        }

        trace!("Displaying {} of {} rows", rows.len(), self.data.len());
        self.displayed = rows;
    }

    /// Snapshot for a renderer.
    pub fn view(&self) -> TableView {
        let params = self.negotiator.state();
        let checkbox = self.config.checkbox;

        let header = self.config.headers.then(|| HeaderBar {
            elements: self.config.elements.clone(),
            loader: self
                .config
                .loader
                .clone()
                .filter(|_| self.config.loading),
            search_text: self.search_text.clone(),
        });

        let columns = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                text: column.header().to_string(),
                sortable: column.sortable,
                indicator: column.sortable.then(|| {
                    match (params.sort_by(), params.sort_direction()) {
                        (Some(by), Some(Direction::Asc)) if by == column.key => {
                            SortIndicator::Ascending
                        }
                        (Some(by), Some(Direction::Desc)) if by == column.key => {
                            SortIndicator::Descending
                        }
                        _ => SortIndicator::Unsorted,
                    }
                }),
            })
            .collect();

        let rows = self
            .displayed
            .iter()
            .map(|record| RowView {
                selected: checkbox.then(|| self.selection.is_selected(record)),
                cells: self.columns.iter().map(|column| column.cell(record)).collect(),
            })
            .collect();

        let empty = self.displayed.is_empty().then(|| EmptyState {
            message: self.empty_message(),
            colspan: self.columns.len() + usize::from(checkbox),
        });

        let pager = self.config.pagination.then(|| PagerView {
            page: params.page(),
            previous_enabled: self.negotiator.can_go_previous(),
            next_enabled: self.negotiator.can_go_next(!self.displayed.is_empty()),
            options: self.page_size_options(),
            current: params.page_size(),
        });

        TableView {
            header,
            columns,
            select_all: checkbox.then(|| self.selection.is_all_selected(&self.displayed)),
            rows,
            empty,
            pager,
        }
    }

    fn empty_message(&self) -> String {
        match (&self.config.no_data, self.config.loading) {
            (Some(content), _) => content.clone(),
            (None, true) => LOADING_TEXT.to_string(),
            (None, false) => NO_DATA_TEXT.to_string(),
        }
    }
}

impl fmt::Debug for Datatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Datatable")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("displayed", &self.displayed.len())
            .field("params", self.negotiator.state())
            .field("selection", &self.selection)
            .field("disposed", &self.disposed)
            .finish()
    }
}
