//! Backfill reads and batched enrichment writes

use crate::db::Archive;
use crate::error::{Result, StoreError};
use crate::models::EnrichmentUpdate;

/// Counts of one committed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub updated: u64,
    pub deleted: u64,
}

/// Enrichment repository
pub struct EnrichmentRepo<'a> {
    archive: &'a Archive,
}

impl<'a> EnrichmentRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Next ascending page of not-yet-enriched tweet ids in one shard
    ///
    /// A row is unenriched while `favorites_count` is NULL. The shard is
    /// `tweet_id % modulus = offset`.
    pub async fn unenriched_page(
        &self,
        after: i64,
        modulus: i64,
        offset: i64,
        limit: u32,
    ) -> Result<Vec<i64>> {
        if modulus <= 0 || !(0..modulus).contains(&offset) {
            return Err(StoreError::invalid(
                "shard",
                format!("offset {} outside modulus {}", offset, modulus),
            ));
        }

        let ids = sqlx::query_scalar(
            r#"
            SELECT tweet_id FROM tweets
            WHERE favorites_count IS NULL AND tweet_id > ? AND tweet_id % ? = ?
            ORDER BY tweet_id ASC LIMIT ?
            "#,
        )
        .bind(after)
        .bind(modulus)
        .bind(offset)
        .bind(i64::from(limit))
        .fetch_all(self.archive.pool())
        .await?;
        Ok(ids)
    }

    /// Apply staged updates in one transaction
    pub async fn commit(&self, updates: &[EnrichmentUpdate]) -> Result<CommitStats> {
        let mut stats = CommitStats::default();
        if updates.is_empty() {
            return Ok(stats);
        }

        let mut tx = self.archive.pool().begin().await?;
        for update in updates {
            match update {
                EnrichmentUpdate::Deleted { tweet_id } => {
                    sqlx::query("UPDATE tweets SET deleted = 1 WHERE tweet_id = ?")
                        .bind(tweet_id)
                        .execute(&mut *tx)
                        .await?;
                    stats.deleted += 1;
                }
                EnrichmentUpdate::Enriched { tweet_id, fields } => {
                    sqlx::query(
                        r#"
                        UPDATE tweets SET
                            is_retweet = ?, retweet_user_id = ?, retweet_status_id = ?,
                            retweet_count = ?, favorites_count = ?, in_reply_to_user_id = ?,
                            in_reply_to_status_id = ?, in_reply_to_screen_name = ?,
                            coordinates = ?, source = ?, deleted = 0
                        WHERE tweet_id = ?
                        "#,
                    )
                    .bind(fields.is_retweet)
                    .bind(fields.retweet_user_id)
                    .bind(fields.retweet_status_id)
                    .bind(fields.retweet_count)
                    .bind(fields.favorites_count)
                    .bind(fields.in_reply_to_user_id)
                    .bind(fields.in_reply_to_status_id)
                    .bind(&fields.in_reply_to_screen_name)
                    .bind(&fields.coordinates)
                    .bind(&fields.source)
                    .bind(tweet_id)
                    .execute(&mut *tx)
                    .await?;
                    stats.updated += 1;
                }
            }
        }
        tx.commit().await?;

        Ok(stats)
    }
}
