//! Search error types

use thiserror::Error;

/// Search compilation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// A token of a specific kind was required but something else (or the
    /// end of the query) was found
    #[error("unexpected {found}, expecting {expected}")]
    Syntax {
        /// Kind of token required
        expected: &'static str,
        /// What was actually there
        found: String,
    },

    /// The screen-name lookup backing `@mention` failed
    #[error("mention lookup failed: {0}")]
    Resolve(String),
}

impl SearchError {
    pub fn unexpected_end(expected: &'static str) -> Self {
        Self::Syntax {
            expected,
            found: "end of query".to_string(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
