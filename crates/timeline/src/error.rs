//! Timeline error types

use thiserror::Error;

/// Errors raised while interpreting client-supplied time and paging input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    /// A `<offset>-<size>` cursor could not be parsed
    #[error("invalid cursor '{0}': expected <offset>-<size>")]
    InvalidCursor(String),

    /// A numeric header or path segment could not be parsed
    #[error("invalid {field}: '{value}'")]
    InvalidNumber {
        /// Header or parameter name
        field: &'static str,
        /// Raw value received
        value: String,
    },

    /// Scan type string not recognised
    #[error("unknown scan type: {0}")]
    UnknownScanType(String),
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;
