//! Typed access to row fields

/// A typed getter on [`Record`](crate::model::Record) could not produce its
/// type. `Null` is not an error; getters return `Ok(None)` for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Row has no field '{field}'")]
    Missing { field: String },

    /// `found` is the [`Value::type_name`](crate::model::Value::type_name)
    /// of what the row holds.
    #[error("Row field '{field}' holds a {found}, not a {wanted}")]
    WrongType {
        field: String,
        wanted: &'static str,
        found: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn wrong_type(field: impl Into<String>, wanted: &'static str, found: &'static str) -> Self {
        Self::WrongType {
            field: field.into(),
            wanted,
            found,
        }
    }

    /// The field the getter asked for.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::WrongType { field, .. } => field,
        }
    }
}
