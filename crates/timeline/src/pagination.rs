//! Stateless pagination
//!
//! Two schemes, both fully client-held:
//!
//! - [`TimelineWindow`]: `id > since_id AND id <= max_id`, newest first,
//!   limited to `count`. Clients walk backwards by lowering `max_id`.
//! - [`Cursor`]: absolute `<offset>-<size>` listings with next/previous
//!   cursors returned in response headers.

use crate::error::{Result, TimelineError};

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| TimelineError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Reverse-chronological window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    /// Exclusive lower bound (default 0)
    pub since_id: i64,
    /// Inclusive upper bound, `None` for +infinity
    pub max_id: Option<i64>,
    /// Row limit, already capped
    pub count: u32,
}

impl TimelineWindow {
    /// Build from the raw `X-Since-ID`, `X-Max-ID` and `X-Since-Count` values
    pub fn from_headers(
        since_id: Option<&str>,
        max_id: Option<&str>,
        since_count: Option<&str>,
        default_count: u32,
        count_bound: u32,
    ) -> Result<Self> {
        let since_id = since_id
            .map(|v| parse_number("X-Since-ID", v))
            .transpose()?
            .unwrap_or(0);
        let max_id = max_id.map(|v| parse_number("X-Max-ID", v)).transpose()?;
        let count = match since_count {
            Some(v) => parse_number::<u32>("X-Since-Count", v)?.min(count_bound),
            None => default_count.min(count_bound),
        };

        Ok(Self {
            since_id,
            max_id,
            count,
        })
    }

    pub fn contains(&self, id: i64) -> bool {
        id > self.since_id && self.max_id.is_none_or(|max| id <= max)
    }
}

/// Offset cursor `<offset>-<size>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub offset: u64,
    pub size: u32,
    /// The raw `X-Cursor` value when the client sent one
    pub current: Option<String>,
}

/// Response headers derived from a [`Cursor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorHeaders {
    pub next: String,
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl Cursor {
    /// Parse a `<offset>-<size>` token; the size is capped at `size_bound`
    pub fn parse(raw: &str, size_bound: u32) -> Result<Self> {
        let invalid = || TimelineError::InvalidCursor(raw.to_string());
        let (offset, size) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let offset: u64 = offset.parse().map_err(|_| invalid())?;
        let size: u32 = size.parse().map_err(|_| invalid())?;
        if size == 0 {
            return Err(invalid());
        }

        Ok(Self {
            offset,
            size: size.min(size_bound),
            current: Some(raw.to_string()),
        })
    }

    /// Resolve from the raw `X-Cursor` / `X-Cursor-Size` values
    ///
    /// `X-Cursor` wins when both are present. With neither, the listing
    /// starts at offset 0 with `default_size`.
    pub fn from_headers(
        cursor: Option<&str>,
        cursor_size: Option<&str>,
        default_size: u32,
        size_bound: u32,
    ) -> Result<Self> {
        if let Some(raw) = cursor {
            return Self::parse(raw, size_bound);
        }

        let size = match cursor_size {
            Some(v) => {
                let size: u32 = parse_number("X-Cursor-Size", v)?;
                if size == 0 {
                    return Err(TimelineError::InvalidNumber {
                        field: "X-Cursor-Size",
                        value: v.to_string(),
                    });
                }
                size.min(size_bound)
            }
            None => default_size.min(size_bound).max(1),
        };

        Ok(Self {
            offset: 0,
            size,
            current: None,
        })
    }

    pub fn next(&self) -> String {
        format!("{}-{}", self.offset.saturating_add(self.size as u64), self.size)
    }

    pub fn previous(&self) -> Option<String> {
        (self.offset > 0).then(|| {
            format!(
                "{}-{}",
                self.offset.saturating_sub(self.size as u64),
                self.size
            )
        })
    }

    pub fn headers(&self) -> CursorHeaders {
        CursorHeaders {
            next: self.next(),
            previous: self.previous(),
            current: self.current.clone(),
        }
    }
}
