//! Errors raised while loading row data

/// Error type for building records from JSON.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A row was some JSON type other than an object.
    #[error("Expected a JSON object for a record, got {actual}")]
    NotAnObject { actual: &'static str },

    /// The input was not valid JSON, or not an array of objects.
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecordError {
    /// Creates a not-an-object error from the offending JSON value.
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        let actual = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::NotAnObject { actual }
    }
}
