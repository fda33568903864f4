//! Parameter negotiation between the widget and its host.
//!
//! The negotiator owns the [`ParamState`] and republishes the whole snapshot
//! to the host whenever any facet changes. A transition that leaves the state
//! as it was publishes nothing.

use std::fmt;

use log::debug;

use crate::params::{PageSize, ParamState, clamp_page, clamp_per_page};
use crate::sort::{Direction, SortState};

/// Host callback receiving every new parameter snapshot.
pub type ParamsSink = Box<dyn FnMut(&ParamState)>;

pub struct ParamNegotiator {
    state: ParamState,
    sink: Option<ParamsSink>,
}

impl ParamNegotiator {
    /// Creates a negotiator with the mount-time state and no sink.
    pub fn new(per_page: u64) -> Self {
        Self {
            state: ParamState::new(per_page),
            sink: None,
        }
    }

    /// Sets the host sink (builder pattern).
    pub fn with_sink(mut self, sink: impl FnMut(&ParamState) + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    /// Sets the host sink.
    pub fn set_sink(&mut self, sink: impl FnMut(&ParamState) + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Drops the host sink. Nothing is published afterwards.
    pub fn detach(&mut self) {
        self.sink = None;
    }

    /// Returns `true` if a host sink is registered.
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// The current snapshot.
    pub fn state(&self) -> &ParamState {
        &self.state
    }

    /// Publishes the current snapshot unconditionally.
    pub fn publish(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            debug!("Publishing params: {:?}", self.state);
            sink(&self.state);
        }
    }

    // -------------------------------------------------------------------------
    // Search facet
    // -------------------------------------------------------------------------

    /// Sets the search key.
    pub fn set_key(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        self.apply(|state| state.set_key(key))
    }

    // -------------------------------------------------------------------------
    // Sort facet
    // -------------------------------------------------------------------------

    /// Sorts on `column_key`, flipping the last direction.
    ///
    /// The direction flips from whatever the previous sort used, on any
    /// column; before the first sort it counts as ascending, so the first
    /// click sorts descending.
    pub fn toggle_sort(&mut self, column_key: &str) -> SortState {
        let current = self.state.sort_direction().unwrap_or(Direction::Asc);
        let sort = SortState::new(column_key, current.flip());
        let published = sort.clone();
        self.apply(|state| state.set_sort(sort));
        published
    }

    // -------------------------------------------------------------------------
    // Page facet
    // -------------------------------------------------------------------------

    /// Returns `true` when "Previous" is enabled.
    pub fn can_go_previous(&self) -> bool {
        self.state.page() > 1
    }

    /// Returns `true` when "Next" is enabled: there are rows on display.
    pub fn can_go_next(&self, has_rows: bool) -> bool {
        has_rows
    }

    /// Moves one page back. No-op on page 1.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        let page = self.state.page() - 1;
        self.apply(|state| state.set_page(page))
    }

    /// Moves one page forward. No-op when nothing is displayed.
    pub fn next_page(&mut self, has_rows: bool) -> bool {
        if !self.can_go_next(has_rows) {
            return false;
        }
        let page = self.state.page().saturating_add(1);
        self.apply(|state| state.set_page(page))
    }

    /// Jumps to a page; values below 1 are clamped to 1.
    pub fn set_page(&mut self, page: i64) -> bool {
        let page = clamp_page(page);
        self.apply(|state| state.set_page(page))
    }

    /// Selects a page-size menu entry.
    pub fn set_page_size(&mut self, size: PageSize) -> bool {
        self.apply(|state| state.set_per_page(size.value()))
    }

    /// Sets rows per page; values below 1 are clamped to 1.
    pub fn set_per_page(&mut self, per_page: i64) -> bool {
        let per_page = clamp_per_page(per_page);
        self.apply(|state| state.set_per_page(per_page))
    }

    fn apply(&mut self, change: impl FnOnce(&mut ParamState)) -> bool {
        let before = self.state.clone();
        change(&mut self.state);
        if self.state == before {
            return false;
        }
        self.publish();
        true
    }
}

impl fmt::Debug for ParamNegotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamNegotiator")
            .field("state", &self.state)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
