//! Row selection keyed by an extracted row key.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::model::Record;

/// Identity of a row for selection purposes.
pub type RowKey = String;

/// Extracts a [`RowKey`] from a record.
pub type RowKeyFn = Rc<dyn Fn(&Record) -> RowKey>;

/// Default row key: the record's JSON text, so equal records share a key.
pub fn value_key(record: &Record) -> RowKey {
    serde_json::to_string(record).unwrap_or_else(|_| format!("{:?}", record))
}

/// Tracks selected rows by key, in the order they were selected.
///
/// Keys survive data reloads: a host that rebuilds its records between
/// renders keeps the selection as long as the key extractor returns the same
/// keys.
#[derive(Clone)]
pub struct SelectionSet {
    key_fn: RowKeyFn,
    keys: HashSet<RowKey>,
    rows: Vec<(RowKey, Record)>,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSet {
    /// Create an empty selection keyed by record value.
    pub fn new() -> Self {
        Self::with_key(value_key)
    }

    /// Create an empty selection with a custom key extractor.
    pub fn with_key(key_fn: impl Fn(&Record) -> RowKey + 'static) -> Self {
        Self {
            key_fn: Rc::new(key_fn),
            keys: HashSet::new(),
            rows: Vec::new(),
        }
    }

    /// The key of `record`.
    pub fn key_of(&self, record: &Record) -> RowKey {
        (self.key_fn)(record)
    }

    /// Toggle selection for a row. Returns `true` if the row is now selected.
    pub fn toggle(&mut self, record: &Record) -> bool {
        let key = self.key_of(record);
        if self.keys.remove(&key) {
            self.rows.retain(|(k, _)| *k != key);
            debug!("Deselected row {}", key);
            false
        } else {
            debug!("Selected row {}", key);
            self.keys.insert(key.clone());
            self.rows.push((key, record.clone()));
            true
        }
    }

    /// Select-all toggle over the displayed rows.
    ///
    /// Clears the selection when every displayed row is already selected,
    /// otherwise selects all of them. Returns `true` if everything is now
    /// selected.
    pub fn toggle_all(&mut self, displayed: &[Record]) -> bool {
        if self.is_all_selected(displayed) {
            self.clear();
            return false;
        }
        self.clear();
        for record in displayed {
            let key = self.key_of(record);
            if self.keys.insert(key.clone()) {
                self.rows.push((key, record.clone()));
            }
        }
        !self.is_empty()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, record: &Record) -> bool {
        self.keys.contains(&self.key_of(record))
    }

    /// Check if a key is selected.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Returns `true` if `displayed` is non-empty and every row in it is
    /// selected.
    pub fn is_all_selected(&self, displayed: &[Record]) -> bool {
        !displayed.is_empty() && displayed.iter().all(|record| self.is_selected(record))
    }

    /// Drops selected rows whose key no longer appears in `data`, and
    /// refreshes the stored copy of those that remain. Returns `true` if any
    /// row was dropped.
    pub fn retain_present(&mut self, data: &[Record]) -> bool {
        let key_fn = Rc::clone(&self.key_fn);
        let before = self.rows.len();
        let mut fresh: Vec<(RowKey, Record)> = Vec::with_capacity(before);
        for (key, stored) in self.rows.drain(..) {
            let current = data.iter().find(|record| key_fn(record) == key);
            match current {
                Some(record) => fresh.push((key, record.clone())),
                None => debug!("Dropping selection of vanished row {} ({:?})", key, stored),
            }
        }
        self.keys = fresh.iter().map(|(key, _)| key.clone()).collect();
        self.rows = fresh;
        self.rows.len() != before
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.rows.clear();
    }

    /// Selected rows, in selection order.
    pub fn selected(&self) -> Vec<Record> {
        self.rows.iter().map(|(_, record)| record.clone()).collect()
    }

    /// Selected keys, in selection order.
    pub fn selected_keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSet")
            .field("keys", &self.rows.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}
