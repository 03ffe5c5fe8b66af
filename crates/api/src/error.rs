//! API error types
//!
//! Every failure leaves the API as `{"error": CODE, "message": text}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pacsocial_auth::AuthError;
use pacsocial_search::SearchError;
use pacsocial_store::StoreError;
use pacsocial_timeline::TimelineError;
use serde::Serialize;
use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Malformed search query
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// No `Authorization` header
    #[error("authentication required")]
    Unauthorized,

    /// Passcode not recognised
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found or not visible
    #[error("not found: {0}")]
    NotFound(String),

    /// Guessing is closed for this phase
    #[error("guessing closed: {0}")]
    GuessingClosed(String),

    /// Internal server error; the message never carries storage details
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::GuessingClosed(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::GuessingClosed(_) => "GUESSING_CLOSED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found", entity, id))
    }
}

impl From<TimelineError> for ApiError {
    fn from(e: TimelineError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Syntax { .. } => Self::InvalidQuery(e.to_string()),
            SearchError::Resolve(msg) => {
                tracing::error!(error = %msg, "mention lookup failed");
                Self::Internal("search failed".to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid { .. } => Self::BadRequest(e.to_string()),
            other => {
                tracing::error!(error = %other, "store failure");
                Self::Internal("storage failure".to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => Self::Unauthorized,
            AuthError::UnknownPasscode | AuthError::EmptyPasscode => {
                Self::Forbidden(e.to_string())
            }
            other => {
                tracing::error!(error = %other, "team lookup failed");
                Self::Internal("authentication unavailable".to_string())
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub error: &'static str,
    /// Error message (human-readable)
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.code(),
            message: self.to_string(),
        };

        tracing::warn!(
            error_code = body.error,
            error_message = %body.message,
            status = %status,
            "API error"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
