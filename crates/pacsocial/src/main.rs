//! PacSocial - archived social data behind a virtual clock
//!
//! # Usage
//!
//! ```bash
//! # Run the API server
//! pacsocial serve --config pacsocial.toml
//!
//! # Enrich one shard of the archive
//! pacsocial backfill --modulus 4 --offset 1
//!
//! # Provision the competition
//! pacsocial team add red s3cret
//! pacsocial bot add 12345 --kill-date 1424149200
//! ```

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pacsocial_config::{Config, LogFormat, filter_directive};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// PacSocial - archived social data behind a virtual clock
#[derive(Parser, Debug)]
#[command(name = "pacsocial")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve,

    /// Enrich unenriched tweets of one shard from the upstream API
    Backfill(cmd::backfill::BackfillArgs),

    /// Manage competition teams
    Team(cmd::team::TeamArgs),

    /// Manage ground-truth bots
    Bot(cmd::bot::BotArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cmd::load_config(cli.config.as_deref())?;

    let log_level = resolve_log_level(cli.log_level.as_deref(), &config);
    init_logging(&log_level, config.log.format)?;

    match cli.command {
        Command::Serve => cmd::serve::run(config).await,
        Command::Backfill(args) => cmd::backfill::run(args, config).await,
        Command::Team(args) => cmd::team::run(args, config).await,
        Command::Bot(args) => cmd::bot::run(args, config).await,
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => config.log.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(level))
        .or_else(|_| EnvFilter::try_new(filter_directive("info")))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
    }

    Ok(())
}
