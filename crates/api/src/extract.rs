//! Request-context extractors
//!
//! Each extractor resolves one slice of request context before the handler
//! runs, so handlers only see validated values:
//!
//! - [`Temporal`] - the clock moment and the clamped virtual time
//! - [`Timeline`] - `X-Since-ID` / `X-Max-ID` / `X-Since-Count`
//! - [`Paging`] - `X-Cursor` / `X-Cursor-Size`
//! - [`DebugMode`] - presence of `X-Debug`
//! - [`Team`] - the team behind `Authorization: Bearer <passcode>`
//! - [`Values`] - query string plus form or JSON body

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, RawPathParams, Request};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use pacsocial_timeline::{Cursor, Moment, TimelineWindow};

use crate::error::ApiError;
use crate::state::AppState;

pub const X_SINCE_ID: &str = "x-since-id";
pub const X_MAX_ID: &str = "x-max-id";
pub const X_SINCE_COUNT: &str = "x-since-count";
pub const X_CURSOR: &str = "x-cursor";
pub const X_CURSOR_SIZE: &str = "x-cursor-size";
pub const X_DEBUG: &str = "x-debug";

fn header<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, ApiError> {
    parts
        .headers
        .get(name)
        .map(|v| {
            v.to_str()
                .map_err(|_| ApiError::bad_request(format!("{} is not visible ASCII", name)))
        })
        .transpose()
}

// ============================================================================
// Temporal
// ============================================================================

/// Clock moment of this request and the virtual time it reads at
///
/// The `{vtime}` path segment, when the route has one, is a wall-clock
/// epoch; it is translated to virtual time and clamped into
/// `[competition_start, current_virtual_time]`.
#[derive(Debug, Clone, Copy)]
pub struct Temporal {
    pub moment: Moment,
    pub vtime: i64,
}

impl Temporal {
    pub fn in_beta(&self) -> bool {
        self.moment.in_beta()
    }
}

impl FromRequestParts<AppState> for Temporal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let requested = match RawPathParams::from_request_parts(parts, state).await {
            Ok(params) => params
                .iter()
                .find(|(key, _)| *key == "vtime")
                .map(|(_, value)| {
                    value
                        .parse::<i64>()
                        .map_err(|_| ApiError::bad_request(format!("invalid vtime '{}'", value)))
                })
                .transpose()?,
            Err(_) => None,
        };

        let moment = state.clock.moment();
        Ok(Self {
            moment,
            vtime: virtual_time_at(&moment, requested),
        })
    }
}

/// Virtual time for an optional wall-clock request, never past "now"
fn virtual_time_at(moment: &Moment, alpha: Option<i64>) -> i64 {
    moment.clamp(alpha.map(|alpha| moment.to_virtual(alpha)))
}

// ============================================================================
// Paging
// ============================================================================

/// Reverse-chronological id window from the timeline headers
#[derive(Debug, Clone, Copy)]
pub struct Timeline(pub TimelineWindow);

impl FromRequestParts<AppState> for Timeline {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let window = TimelineWindow::from_headers(
            header(parts, X_SINCE_ID)?,
            header(parts, X_MAX_ID)?,
            header(parts, X_SINCE_COUNT)?,
            state.limits.default_size,
            state.limits.max_size,
        )?;
        Ok(Self(window))
    }
}

/// Offset cursor from the cursor headers
#[derive(Debug, Clone)]
pub struct Paging(pub Cursor);

impl FromRequestParts<AppState> for Paging {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let cursor = Cursor::from_headers(
            header(parts, X_CURSOR)?,
            header(parts, X_CURSOR_SIZE)?,
            state.limits.default_size,
            state.limits.max_size,
        )?;
        Ok(Self(cursor))
    }
}

/// Whether the client asked for the compiler trace
#[derive(Debug, Clone, Copy)]
pub struct DebugMode(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for DebugMode {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.headers.contains_key(X_DEBUG)))
    }
}

// ============================================================================
// Team
// ============================================================================

/// The authenticated team
///
/// Missing header is `401`; an unrecognised passcode is `403`.
#[derive(Debug, Clone, Copy)]
pub struct Team(pub i64);

impl FromRequestParts<AppState> for Team {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .map(|v| {
                v.to_str()
                    .map_err(|_| ApiError::Forbidden("malformed authorization header".to_string()))
            })
            .transpose()?;

        let team_id = state.auth.authenticate(authorization).await?;
        Ok(Self(team_id))
    }
}

// ============================================================================
// Values
// ============================================================================

/// Request values: query string pairs, then form body pairs, plus a JSON body
#[derive(Debug, Clone, Default)]
pub struct Values {
    pairs: Vec<(String, String)>,
    json: Option<serde_json::Value>,
}

impl Values {
    /// First value for `key`
    pub fn get<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.all(key).next()
    }

    /// Every value for `key`, in order
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }
}

impl<S: Send + Sync> FromRequest<S> for Values {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        let mut pairs: Vec<(String, String)> = match req.uri().query() {
            Some(query) => serde_urlencoded::from_str(query)
                .map_err(|e| ApiError::bad_request(format!("invalid query string: {}", e)))?,
            None => Vec::new(),
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut json = None;
        if !body.is_empty() {
            if content_type.starts_with("application/json") {
                json = Some(
                    serde_json::from_slice(&body)
                        .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {}", e)))?,
                );
            } else if content_type.starts_with("application/x-www-form-urlencoded") {
                let form: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
                    .map_err(|e| ApiError::bad_request(format!("invalid form body: {}", e)))?;
                pairs.extend(form);
            }
        }

        Ok(Self { pairs, json })
    }
}
