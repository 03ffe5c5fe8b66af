//! Structural scan records

use pacsocial_timeline::{ScanBounds, ScanType};

/// One completed crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub id: i64,
    pub scan_type: ScanType,
    /// Virtual time the crawl started
    pub start: i64,
    /// Virtual time the crawl finished
    pub end: i64,
    pub ref_start: Option<i64>,
    pub ref_end: Option<i64>,
}

impl Scan {
    pub fn bounds(&self) -> ScanBounds {
        ScanBounds::from_scan(self.start, self.end, self.ref_start, self.ref_end)
    }
}

/// Insert form of [`Scan`]
#[derive(Debug, Clone)]
pub struct NewScan {
    pub scan_type: ScanType,
    pub start: i64,
    pub end: i64,
    pub ref_start: Option<i64>,
    pub ref_end: Option<i64>,
}
