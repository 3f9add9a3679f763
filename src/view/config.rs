//! GraphQL view configuration.

use crate::graphiql::{DEFAULT_HTML_TITLE, GRAPHIQL_TEMPLATE, GRAPHIQL_VERSION};
use serde::{Deserialize, Serialize};

/// Configuration for a [`GraphQLView`](crate::GraphQLView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Serve GraphiQL to clients that prefer HTML.
    pub graphiql: bool,
    /// GraphiQL release loaded by the page.
    pub graphiql_version: Option<String>,
    /// Replacement page template.
    pub graphiql_template: Option<String>,
    /// Page title.
    pub graphiql_html_title: Option<String>,
    /// Accept JSON arrays of operations.
    pub batch: bool,
    /// Always pretty-print JSON responses.
    pub pretty: bool,
    /// Run the operations of a batch concurrently.
    pub enable_async: bool,
    /// Websocket URL GraphiQL subscribes through.
    pub subscriptions: Option<String>,
    /// Initial contents of GraphiQL's header editor.
    pub headers: Option<String>,
    /// Query shown when the editor starts empty.
    pub default_query: Option<String>,
    /// Show GraphiQL's header editor.
    pub header_editor_enabled: bool,
    /// Let GraphiQL persist edited headers in local storage.
    pub should_persist_headers: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            graphiql: false,
            graphiql_version: None,
            graphiql_template: None,
            graphiql_html_title: None,
            batch: false,
            pretty: false,
            enable_async: false,
            subscriptions: None,
            headers: None,
            default_query: None,
            header_editor_enabled: true,
            should_persist_headers: false,
        }
    }
}

impl ViewConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable GraphiQL.
    pub fn graphiql(mut self, enabled: bool) -> Self {
        self.graphiql = enabled;
        self
    }

    /// Set the GraphiQL release.
    pub fn graphiql_version(mut self, version: impl Into<String>) -> Self {
        self.graphiql_version = Some(version.into());
        self
    }

    /// Replace the page template.
    pub fn graphiql_template(mut self, template: impl Into<String>) -> Self {
        self.graphiql_template = Some(template.into());
        self
    }

    /// Set the page title.
    pub fn graphiql_html_title(mut self, title: impl Into<String>) -> Self {
        self.graphiql_html_title = Some(title.into());
        self
    }

    /// Enable or disable batching.
    pub fn batch(mut self, enabled: bool) -> Self {
        self.batch = enabled;
        self
    }

    /// Always pretty-print.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Run batch entries concurrently.
    pub fn enable_async(mut self, enabled: bool) -> Self {
        self.enable_async = enabled;
        self
    }

    /// Set the subscriptions URL.
    pub fn subscriptions(mut self, url: impl Into<String>) -> Self {
        self.subscriptions = Some(url.into());
        self
    }

    /// Set the initial GraphiQL headers.
    pub fn headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Set the default query.
    pub fn default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = Some(query.into());
        self
    }

    /// Show or hide the header editor.
    pub fn header_editor_enabled(mut self, enabled: bool) -> Self {
        self.header_editor_enabled = enabled;
        self
    }

    /// Persist edited headers.
    pub fn should_persist_headers(mut self, enabled: bool) -> Self {
        self.should_persist_headers = enabled;
        self
    }

    /// The page template in effect.
    pub fn template(&self) -> &str {
        self.graphiql_template.as_deref().unwrap_or(GRAPHIQL_TEMPLATE)
    }

    /// The GraphiQL release in effect.
    pub fn version(&self) -> &str {
        self.graphiql_version.as_deref().unwrap_or(GRAPHIQL_VERSION)
    }

    /// The page title in effect.
    pub fn html_title(&self) -> &str {
        self.graphiql_html_title
            .as_deref()
            .unwrap_or(DEFAULT_HTML_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ViewConfig::default();

        assert!(!config.graphiql);
        assert!(config.header_editor_enabled);
        assert!(!config.should_persist_headers);
        assert_eq!(config.html_title(), "GraphiQL");
        assert_eq!(config.version(), GRAPHIQL_VERSION);
        assert_eq!(config.template(), GRAPHIQL_TEMPLATE);
    }

    #[test]
    fn partial_config_deserializes() {
        let config: ViewConfig =
            serde_json::from_str(r#"{"graphiql": true, "graphiql_html_title": "Awesome"}"#)
                .unwrap();

        assert!(config.graphiql);
        assert_eq!(config.html_title(), "Awesome");
        assert!(config.header_editor_enabled);
    }
}
