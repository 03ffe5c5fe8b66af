//! Error types for connectors

use thiserror::Error;

/// Errors that can occur talking to the upstream platform or running a backfill
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Failed to initialize a client (e.g., HTTP client creation failed)
    #[error("failed to initialize connector: {0}")]
    Init(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream answered 429
    #[error("rate limited")]
    RateLimited,

    /// The bearer token is no longer accepted (upstream error code 89)
    #[error("bearer token expired")]
    TokenExpired,

    /// Authentication failed for another reason
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Upstream answered with a status the client does not handle
    #[error("unexpected upstream status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Archive read or write failed
    #[error("store error: {0}")]
    Store(#[from] pacsocial_store::StoreError),
}

impl ConnectorError {
    /// Failures worth retrying in place after a backoff
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::TokenExpired => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for connector operations
pub type Result<T> = std::result::Result<T, ConnectorError>;
