//! Column descriptors.

use std::fmt;
use std::rc::Rc;

use log::trace;
use serde::Deserialize;

use crate::error::TableError;
use crate::model::{Record, Value};

/// Computes a cell from the whole row.
pub type CellAccessor = Rc<dyn Fn(&Record) -> Value>;

/// A table column definition.
///
/// `key` names the record field shown in the column, unless a value accessor
/// computes the cell instead.
#[derive(Clone)]
pub struct Column {
    /// Field name, also the sort key.
    pub key: String,
    /// Header text; the key is shown when absent.
    pub label: Option<String>,
    /// Whether clicking the header sorts on this column.
    pub sortable: bool,
    value: Option<CellAccessor>,
}

impl Column {
    /// Create a new column for the given field.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            sortable: false,
            value: None,
        }
    }

    /// Set the header label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark this column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Compute cells with `accessor` instead of reading the field.
    pub fn value(mut self, accessor: impl Fn(&Record) -> Value + 'static) -> Self {
        self.value = Some(Rc::new(accessor));
        self
    }

    /// Returns `true` if a value accessor is set.
    pub fn has_accessor(&self) -> bool {
        self.value.is_some()
    }

    /// Header text.
    pub fn header(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// The cell for `record`, or an error if the field is missing and no
    /// accessor is set.
    pub fn try_cell(&self, record: &Record) -> Result<Value, TableError> {
        if let Some(accessor) = &self.value {
            return Ok(accessor(record));
        }
        record
            .get(&self.key)
            .cloned()
            .ok_or_else(|| TableError::invalid_column_key(&self.key))
    }

    /// The cell for `record`; a missing field renders empty.
    pub fn cell(&self, record: &Record) -> Value {
        self.try_cell(record).unwrap_or_else(|e| {
            trace!("{}", e);
            Value::Null
        })
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("value", &self.value.is_some())
            .finish()
    }
}

/// The serializable part of a column, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sortable: bool,
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        Self {
            key: spec.key,
            label: spec.label,
            sortable: spec.sortable,
            value: None,
        }
    }
}
