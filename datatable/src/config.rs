//! Widget configuration

use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::column::ColumnSpec;
use crate::error::ConfigError;
use crate::params::clamp_per_page;

/// Default rows per page.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Static configuration of a datatable.
///
/// Every field has a default, so a configuration document only needs the
/// options it changes. Host callbacks are not part of this struct; they are
/// attached to the [`Datatable`](crate::Datatable) with its builder methods.
///
/// # Example
///
/// ```
/// use datatable::DatatableConfig;
///
/// let config = DatatableConfig::from_json_str(r#"{"checkbox": true, "perpage": 25}"#).unwrap();
/// assert!(config.checkbox);
/// assert!(config.headers);
/// assert_eq!(config.per_page(), 25);
///
/// let config = DatatableConfig::default().with_pagination(true).with_per_page(50);
/// assert_eq!(config.per_page(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatatableConfig {
    /// Row and select-all checkboxes.
    ///
    /// Default: off
    pub checkbox: bool,

    /// Header bar with the search box and host elements.
    ///
    /// Default: on
    pub headers: bool,

    /// Host content shown in the header bar.
    pub elements: Option<String>,

    /// Pager controls.
    ///
    /// Default: off
    pub pagination: bool,

    /// Initial and default page size. Values below 1 are clamped to 1.
    ///
    /// Default: 10
    pub perpage: i64,

    /// Whether the host is loading data.
    pub loading: bool,

    /// Loading indicator shown in the header while loading.
    pub loader: Option<String>,

    /// Empty-state content.
    pub no_data: Option<String>,

    /// Quiet period before a search edit settles, in milliseconds.
    ///
    /// Default: 300
    pub search_debounce_ms: u64,

    /// Slice the displayed rows to the current page locally instead of
    /// leaving paging to the host.
    ///
    /// Default: off
    pub client_paging: bool,

    /// Column definitions without value accessors.
    pub columns: Vec<ColumnSpec>,
}

impl Default for DatatableConfig {
    fn default() -> Self {
        Self {
            checkbox: false,
            headers: true,
            elements: None,
            pagination: false,
            perpage: DEFAULT_PER_PAGE,
            loading: false,
            loader: None,
            no_data: None,
            search_debounce_ms: 300,
            client_paging: false,
            columns: Vec::new(),
        }
    }
}

impl DatatableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.perpage < 1 {
            warn!("Configured perpage {} is not positive", config.perpage);
        }
        Ok(config)
    }

    /// Page size after clamping.
    pub fn per_page(&self) -> u64 {
        clamp_per_page(self.perpage)
    }

    /// Search debounce window.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Enables checkboxes.
    pub fn with_checkbox(mut self, checkbox: bool) -> Self {
        self.checkbox = checkbox;
        self
    }

    /// Shows or hides the header bar.
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }

    /// Sets header bar content.
    pub fn with_elements(mut self, elements: impl Into<String>) -> Self {
        self.elements = Some(elements.into());
        self
    }

    /// Shows or hides pager controls.
    pub fn with_pagination(mut self, pagination: bool) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets the default page size.
    pub fn with_per_page(mut self, perpage: i64) -> Self {
        self.perpage = perpage;
        self
    }

    /// Sets the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Sets the loading indicator.
    pub fn with_loader(mut self, loader: impl Into<String>) -> Self {
        self.loader = Some(loader.into());
        self
    }

    /// Sets the empty-state content.
    pub fn with_no_data(mut self, no_data: impl Into<String>) -> Self {
        self.no_data = Some(no_data.into());
        self
    }

    /// Sets the search debounce window.
    pub fn with_search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce_ms = window.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Enables local paging of displayed rows.
    pub fn with_client_paging(mut self, client_paging: bool) -> Self {
        self.client_paging = client_paging;
        self
    }

    /// Sets the configured columns.
    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatatableConfig::default();
        assert!(config.headers);
        assert!(!config.checkbox);
        assert_eq!(config.per_page(), 10);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
    }

    #[test]
    fn test_parse_camel_case_and_columns() {
        let config = DatatableConfig::from_json_str(
            r#"{
                "noData": "Nothing here",
                "searchDebounceMs": 0,
                "clientPaging": true,
                "columns": [{"key": "id", "label": "Id", "sortable": true}, {"key": "email"}]
            }"#,
        )
        .unwrap();

        assert_eq!(config.no_data.as_deref(), Some("Nothing here"));
        assert_eq!(config.search_debounce(), Duration::ZERO);
        assert!(config.client_paging);
        assert_eq!(config.columns.len(), 2);
        assert!(config.columns[0].sortable);
        assert_eq!(config.columns[1].label, None);
    }

    #[test]
    fn test_non_positive_perpage_is_clamped() {
        let config = DatatableConfig::from_json_str(r#"{"perpage": 0}"#).unwrap();
        assert_eq!(config.per_page(), 1);
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            DatatableConfig::from_json_str(r#"{"perpage": "ten"}"#),
            Err(ConfigError::Json(_))
        ));
    }
}
