//! API server configuration

use serde::Deserialize;

/// HTTP API server configuration
///
/// # Example
///
/// ```toml
/// [api_server]
/// host = "0.0.0.0"   # default
/// port = 5000        # default
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiServerConfig {
    /// Host to bind to
    /// Default: "0.0.0.0"
    pub host: String,

    /// Port to listen on
    /// Default: 5000
    pub port: u16,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ApiServerConfig {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
