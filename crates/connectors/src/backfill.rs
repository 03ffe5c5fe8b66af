//! Sharded enrichment backfill
//!
//! One driver walks one shard (`tweet_id % modulus == offset`) of the
//! unenriched tweets in ascending id order, strictly sequentially:
//! fetch a page, look it up upstream, stage the updates. Staged updates
//! are committed every `flush_every` pages and whenever a rate limit or
//! an error is seen, so a crash loses at most one flush interval.

use std::fmt;
use std::time::Duration;

use pacsocial_config::BackfillConfig;
use pacsocial_store::{Archive, EnrichmentUpdate};
use tracing::{info, warn};

use crate::error::{ConnectorError, Result};
use crate::multiplexer::LookupSource;

/// A partition of the tweet id space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    pub modulus: i64,
    pub offset: i64,
}

impl Shard {
    pub fn new(modulus: i64, offset: i64) -> Result<Self> {
        if modulus <= 0 || !(0..modulus).contains(&offset) {
            return Err(ConnectorError::ConfigError(format!(
                "shard offset {} outside modulus {}",
                offset, modulus
            )));
        }
        Ok(Self { modulus, offset })
    }

    /// The whole id space as a single shard
    pub fn all() -> Self {
        Self {
            modulus: 1,
            offset: 0,
        }
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.offset, self.modulus)
    }
}

/// Driver tuning
#[derive(Debug, Clone)]
pub struct BackfillSettings {
    pub page_size: u32,
    pub flush_every: u32,
    pub rate_limit_sleep: Duration,
}

impl From<&BackfillConfig> for BackfillSettings {
    fn from(config: &BackfillConfig) -> Self {
        Self {
            page_size: config.page_size,
            flush_every: config.flush_every.max(1),
            rate_limit_sleep: Duration::from_secs(config.rate_limit_sleep_secs),
        }
    }
}

/// Totals of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub pages: u64,
    pub updated: u64,
    pub deleted: u64,
    pub skipped_pages: u64,
    pub rate_limited: u64,
}

/// Walks one shard until no unenriched tweets remain
pub struct BackfillDriver<S> {
    archive: Archive,
    source: S,
    shard: Shard,
    settings: BackfillSettings,
}

impl<S: LookupSource> BackfillDriver<S> {
    pub fn new(archive: Archive, source: S, shard: Shard, settings: BackfillSettings) -> Self {
        Self {
            archive,
            source,
            shard,
            settings,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn run(&self) -> Result<BackfillSummary> {
        let mut summary = BackfillSummary::default();
        let mut staged: Vec<EnrichmentUpdate> = Vec::new();
        let mut pages_since_flush = 0u32;
        let mut last = 0i64;

        info!(node = %self.shard, page_size = self.settings.page_size, "backfill started");

        loop {
            let ids = self
                .archive
                .enrichment()
                .unenriched_page(
                    last,
                    self.shard.modulus,
                    self.shard.offset,
                    self.settings.page_size,
                )
                .await?;
            let Some(&around) = ids.last() else {
                break;
            };

            match self.source.lookup(&ids).await {
                Ok(response) => {
                    staged.extend(response.into_updates(&ids));
                    summary.pages += 1;
                    last = around;
                    pages_since_flush += 1;
                    if pages_since_flush >= self.settings.flush_every {
                        self.flush(&mut staged, &mut summary, around).await?;
                        pages_since_flush = 0;
                    }
                }
                Err(ConnectorError::RateLimited) => {
                    summary.rate_limited += 1;
                    self.flush(&mut staged, &mut summary, around).await?;
                    pages_since_flush = 0;
                    info!(
                        node = %self.shard,
                        around,
                        sleep_secs = self.settings.rate_limit_sleep.as_secs(),
                        "rate limited, sleeping"
                    );
                    tokio::time::sleep(self.settings.rate_limit_sleep).await;
                }
                Err(e) => {
                    summary.skipped_pages += 1;
                    self.flush(&mut staged, &mut summary, around).await?;
                    pages_since_flush = 0;
                    warn!(node = %self.shard, around, error = %e, "lookup failed, skipping page");
                    tokio::time::sleep(self.settings.rate_limit_sleep).await;
                    last = around;
                }
            }
        }

        if let Some(last_staged) = staged.last() {
            let around = match last_staged {
                EnrichmentUpdate::Enriched { tweet_id, .. } => *tweet_id,
                EnrichmentUpdate::Deleted { tweet_id } => *tweet_id,
            };
            self.flush(&mut staged, &mut summary, around).await?;
        }

        info!(
            node = %self.shard,
            pages = summary.pages,
            updated = summary.updated,
            deleted = summary.deleted,
            skipped = summary.skipped_pages,
            "backfill finished"
        );
        Ok(summary)
    }

    async fn flush(
        &self,
        staged: &mut Vec<EnrichmentUpdate>,
        summary: &mut BackfillSummary,
        around: i64,
    ) -> Result<()> {
        if staged.is_empty() {
            return Ok(());
        }

        let stats = self.archive.enrichment().commit(staged).await?;
        staged.clear();
        summary.updated += stats.updated;
        summary.deleted += stats.deleted;

        info!(
            node = %self.shard,
            updated = stats.updated,
            deleted = stats.deleted,
            around,
            "flushing"
        );
        Ok(())
    }
}
