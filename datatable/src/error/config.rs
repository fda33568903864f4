//! Configuration errors

/// Error type for loading a [`DatatableConfig`](crate::config::DatatableConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Invalid datatable configuration: {0}")]
    Json(#[from] serde_json::Error),
}
