//! Visibility gate
//!
//! Two independent filters decide what a reader can see:
//!
//! - the beta partition: a row is visible iff its owner's `beta` flag equals
//!   [`Moment::in_beta`]. Beta readers and detection readers see disjoint sets.
//! - scan bounds: the latest structural scan ending at or before the
//!   requested virtual time bounds which surrogate/edge IDs were known then.

use std::fmt;
use std::str::FromStr;

use crate::clock::Moment;
use crate::error::TimelineError;
use crate::pagination::TimelineWindow;

/// Kind of structural crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    /// Profile crawl bounding user observation IDs
    UserInfo,
    /// Follower crawl bounding edge IDs
    Followers,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserInfo => "user-info",
            Self::Followers => "followers",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanType {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user-info" => Ok(Self::UserInfo),
            "followers" => Ok(Self::Followers),
            other => Err(TimelineError::UnknownScanType(other.to_string())),
        }
    }
}

/// Whether an entity with the given beta flag is visible at `moment`
pub fn is_visible(entity_beta: bool, moment: &Moment) -> bool {
    entity_beta == moment.in_beta()
}

/// ID range established by the nearest scan
///
/// `None` on either side means unbounded. When no scan qualifies the bounds
/// collapse to `(0, 0)`: nothing is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBounds {
    pub min_id: Option<i64>,
    pub max_id: Option<i64>,
    /// `(start, end)` virtual window of the scan, echoed as `X-Observed-*`
    pub observed: Option<(i64, i64)>,
}

impl ScanBounds {
    /// Bounds for "no qualifying scan"
    pub fn nothing() -> Self {
        Self {
            min_id: Some(0),
            max_id: Some(0),
            observed: None,
        }
    }

    pub fn from_scan(start: i64, end: i64, ref_start: Option<i64>, ref_end: Option<i64>) -> Self {
        Self {
            min_id: ref_start,
            max_id: ref_end,
            observed: Some((start, end)),
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.observed.is_none() && self.min_id == Some(0) && self.max_id == Some(0)
    }

    /// Inclusive containment on both ends
    pub fn contains(&self, id: i64) -> bool {
        self.min_id.is_none_or(|min| id >= min) && self.max_id.is_none_or(|max| id <= max)
    }
}

/// Half-open ID range `[min_inclusive, max_exclusive)` used for edge lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdWindow {
    pub min_inclusive: i64,
    /// `None` for +infinity
    pub max_exclusive: Option<i64>,
}

impl IdWindow {
    /// Intersect a timeline window with scan bounds, tightest side wins
    ///
    /// The timeline window contributes `[since_id + 1, max_id + 1)`; the scan
    /// contributes `[min_id, max_id)`.
    pub fn intersect(window: &TimelineWindow, bounds: &ScanBounds) -> Self {
        let wanted_min = window.since_id.saturating_add(1);
        let wanted_max = window.max_id.map(|m| m.saturating_add(1));

        let min_inclusive = match bounds.min_id {
            Some(scan_min) => wanted_min.max(scan_min),
            None => wanted_min,
        };
        let max_exclusive = match (wanted_max, bounds.max_id) {
            (Some(w), Some(s)) => Some(w.min(s)),
            (Some(w), None) => Some(w),
            (None, Some(s)) => Some(s),
            (None, None) => None,
        };

        Self {
            min_inclusive,
            max_exclusive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_exclusive
            .is_some_and(|max| max <= self.min_inclusive)
    }

    pub fn contains(&self, id: i64) -> bool {
        id >= self.min_inclusive && self.max_exclusive.is_none_or(|max| id < max)
    }
}
