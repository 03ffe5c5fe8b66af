//! Backfill command - enrich one shard of the archive

use anyhow::{Context, Result};
use clap::Args;
use pacsocial_config::Config;
use pacsocial_connectors::{BackfillDriver, BackfillSettings, Multiplexer, Shard};
use tracing::{info, warn};

use crate::cmd::{open_archive, wait_for_shutdown};

/// Backfill command arguments
#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Number of shards the archive is split into
    #[arg(long, default_value_t = 1)]
    pub modulus: i64,

    /// Shard handled by this process (`tweet_id % modulus == offset`)
    #[arg(long, default_value_t = 0)]
    pub offset: i64,
}

pub async fn run(args: BackfillArgs, config: Config) -> Result<()> {
    let shard = Shard::new(args.modulus, args.offset).context("invalid shard")?;
    let source = Multiplexer::from_config(&config.backfill)
        .context("failed to set up upstream sessions")?;
    let archive = open_archive(&config).await?;

    info!(node = %shard, sessions = source.len(), "starting backfill");
    let driver = BackfillDriver::new(
        archive,
        source,
        shard,
        BackfillSettings::from(&config.backfill),
    );

    tokio::select! {
        summary = driver.run() => {
            let summary = summary.context("backfill failed")?;
            info!(
                node = %shard,
                pages = summary.pages,
                updated = summary.updated,
                deleted = summary.deleted,
                skipped_pages = summary.skipped_pages,
                rate_limited = summary.rate_limited,
                "backfill complete"
            );
        }
        _ = wait_for_shutdown() => {
            warn!(node = %shard, "interrupted; unflushed pages will be fetched again");
        }
    }

    Ok(())
}
