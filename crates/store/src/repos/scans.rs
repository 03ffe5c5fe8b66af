//! Scan repository and the nearest-scan lookup

use pacsocial_timeline::{ScanBounds, ScanType};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;

use crate::db::Archive;
use crate::error::{Result, StoreError};
use crate::models::{NewScan, Scan};

/// Scan repository
pub struct ScanRepo<'a> {
    archive: &'a Archive,
}

impl<'a> ScanRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    pub async fn insert(&self, scan: &NewScan) -> Result<i64> {
        if let (Some(start), Some(end)) = (scan.ref_start, scan.ref_end)
            && start > end
        {
            return Err(StoreError::invalid(
                "ref_start",
                format!("{} is after ref_end {}", start, end),
            ));
        }

        let result = sqlx::query(
            "INSERT INTO scans (type, window_start, window_end, ref_start, ref_end) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(scan.scan_type.as_str())
        .bind(scan.start)
        .bind(scan.end)
        .bind(scan.ref_start)
        .bind(scan.ref_end)
        .execute(self.archive.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Latest inserted scan of `scan_type` that ended at or before `vtime`
    pub async fn nearest(&self, scan_type: ScanType, vtime: i64) -> Result<Option<Scan>> {
        let row = sqlx::query(
            r#"
            SELECT id, type, window_start, window_end, ref_start, ref_end
            FROM scans WHERE type = ? AND window_end <= ?
            ORDER BY id DESC LIMIT 1
            "#,
        )
        .bind(scan_type.as_str())
        .bind(vtime)
        .fetch_optional(self.archive.pool())
        .await?;

        row.as_ref().map(Self::row_to_scan).transpose()
    }

    /// ID bounds visible at `vtime`; "nothing" when no scan qualifies
    pub async fn bounds(&self, scan_type: ScanType, vtime: i64) -> Result<ScanBounds> {
        match self.nearest(scan_type, vtime).await? {
            Some(scan) => Ok(scan.bounds()),
            None => {
                info!(scan_type = %scan_type, vtime, "no scan found around vtime");
                Ok(ScanBounds::nothing())
            }
        }
    }

    fn row_to_scan(row: &SqliteRow) -> Result<Scan> {
        let type_str: String = row.try_get("type")?;
        let scan_type = type_str
            .parse::<ScanType>()
            .map_err(|e| StoreError::invalid("scans.type", e.to_string()))?;

        Ok(Scan {
            id: row.try_get("id")?,
            scan_type,
            start: row.try_get("window_start")?,
            end: row.try_get("window_end")?,
            ref_start: row.try_get("ref_start")?,
            ref_end: row.try_get("ref_end")?,
        })
    }
}
