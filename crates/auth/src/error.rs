//! Authentication error types

use thiserror::Error;

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while authenticating a team
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer value was presented
    #[error("missing token")]
    MissingToken,

    /// The passcode matched no team
    #[error("unknown passcode")]
    UnknownPasscode,

    /// A passcode must not be empty
    #[error("passcode must not be empty")]
    EmptyPasscode,

    /// Hashing or a stored hash failed
    #[error("passcode hash error: {0}")]
    Hash(String),

    /// The team directory could not be read
    #[error("team lookup failed: {0}")]
    Directory(String),
}

impl AuthError {
    /// Whether the client should see 401 (vs 403 for a bad passcode)
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::MissingToken)
    }
}
