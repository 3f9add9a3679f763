//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the [`HttpServer`](crate::runtime::HttpServer).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable health check endpoint.
    pub enable_health: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_health: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
            request_timeout: 30,
        }
    }
}

impl ServerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GRAPHQL_VIEW_HOST` and `GRAPHQL_VIEW_PORT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("GRAPHQL_VIEW_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("GRAPHQL_VIEW_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
        {
            config.port = port;
        }
        config
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable `/_health`.
    pub fn enable_health(mut self, enabled: bool) -> Self {
        self.enable_health = enabled;
        self
    }

    /// Set the body size limit.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = seconds;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_bind_addr() {
        let config = ServerConfig::new().host("127.0.0.1").port(5000);

        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert!(config.enable_health);
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
    }
}
