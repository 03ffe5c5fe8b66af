//! List responses and their paging headers

use axum::Json;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use pacsocial_timeline::{Cursor, ScanBounds};
use serde::Serialize;

pub const X_CURSOR_NEXT: HeaderName = HeaderName::from_static("x-cursor-next");
pub const X_CURSOR_PREVIOUS: HeaderName = HeaderName::from_static("x-cursor-previous");
pub const X_CURSOR_CURRENT: HeaderName = HeaderName::from_static("x-cursor-current");
pub const X_OBSERVED_MIN: HeaderName = HeaderName::from_static("x-observed-min");
pub const X_OBSERVED_MAX: HeaderName = HeaderName::from_static("x-observed-max");
pub const X_DEBUG_TRACE: HeaderName = HeaderName::from_static("x-debug-trace");

/// Headers describing where a scan-bounded read came from
pub fn observed_headers(bounds: &ScanBounds) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some((start, end)) = bounds.observed {
        headers.insert(X_OBSERVED_MIN, HeaderValue::from(start));
        headers.insert(X_OBSERVED_MAX, HeaderValue::from(end));
    }
    headers
}

/// Render trace stages as one header-safe line
pub fn trace_header(trace: &[String]) -> Option<HeaderValue> {
    let line: String = trace
        .join(" | ")
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '?' })
        .collect();
    HeaderValue::from_str(&line).ok()
}

/// A JSON array, or `204 No Content` when empty
#[derive(Debug)]
pub struct Listing<T> {
    items: Vec<T>,
    headers: HeaderMap,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_cursor(mut self, cursor: &Cursor) -> Self {
        let links = cursor.headers();
        if let Ok(next) = HeaderValue::from_str(&links.next) {
            self.headers.insert(X_CURSOR_NEXT, next);
        }
        if let Some(previous) = links.previous.and_then(|p| HeaderValue::from_str(&p).ok()) {
            self.headers.insert(X_CURSOR_PREVIOUS, previous);
        }
        if let Some(current) = links.current.and_then(|c| HeaderValue::from_str(&c).ok()) {
            self.headers.insert(X_CURSOR_CURRENT, current);
        }
        self
    }

    pub fn with_observed(mut self, bounds: &ScanBounds) -> Self {
        self.headers.extend(observed_headers(bounds));
        self
    }

    pub fn with_trace(mut self, trace: Option<&[String]>) -> Self {
        if let Some(value) = trace.and_then(trace_header) {
            self.headers.insert(X_DEBUG_TRACE, value);
        }
        self
    }
}

impl<T: Serialize> IntoResponse for Listing<T> {
    fn into_response(self) -> Response {
        if self.items.is_empty() {
            (StatusCode::NO_CONTENT, self.headers).into_response()
        } else {
            (self.headers, Json(self.items)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_is_no_content() {
        let response = Listing::<i64>::new(Vec::new()).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_cursor_headers() {
        let cursor = Cursor::parse("20-10", 100).unwrap();
        let response = Listing::new(vec![1]).with_cursor(&cursor).into_response();
        let headers = response.headers();
        assert_eq!(headers[&X_CURSOR_NEXT], "30-10");
        assert_eq!(headers[&X_CURSOR_PREVIOUS], "10-10");
        assert_eq!(headers[&X_CURSOR_CURRENT], "20-10");
    }

    #[test]
    fn test_observed_only_with_scan() {
        assert!(observed_headers(&ScanBounds::nothing()).is_empty());
        let headers = observed_headers(&ScanBounds::from_scan(100, 200, Some(1), None));
        assert_eq!(headers[&X_OBSERVED_MIN], "100");
        assert_eq!(headers[&X_OBSERVED_MAX], "200");
    }

    #[test]
    fn test_trace_header_is_ascii() {
        let trace = vec!["1. Parsing \"caf\u{e9}\"".to_string(), "2. Lexed".to_string()];
        let value = trace_header(&trace).unwrap();
        assert_eq!(value, "1. Parsing \"caf?\" | 2. Lexed");
    }
}
