//! PacSocial - Connectors
//!
//! Client side of the upstream platform API and the enrichment backfill
//! that fills tweet columns (retweet and reply linkage, counts, source,
//! coordinates, deletion) from it.
//!
//! # Layers
//!
//! - [`TwitterClient`] - reqwest client: client-credentials token exchange
//!   and mapped bulk lookups
//! - [`Session`] - per-credential bearer-token state machine
//! - [`Multiplexer`] - round-robin over sessions, skipping rate-limited ones,
//!   retrying transient failures with capped exponential backoff
//! - [`BackfillDriver`] - sequential walk over one id shard with batched commits
//!
//! # Example
//!
//! ```ignore
//! use pacsocial_connectors::{BackfillDriver, BackfillSettings, Multiplexer, Shard};
//!
//! let source = Multiplexer::from_config(&config.backfill)?;
//! let driver = BackfillDriver::new(archive, source, Shard::new(4, 1)?, (&config.backfill).into());
//! let summary = driver.run().await?;
//! ```

mod backfill;
mod client;
mod error;
mod multiplexer;
mod payload;
pub mod resilience;
mod session;


pub use backfill::{BackfillDriver, BackfillSettings, BackfillSummary, Shard};
pub use client::{EXPIRED_TOKEN_CODE, TwitterClient, UpstreamApi};
pub use error::{ConnectorError, Result};
pub use multiplexer::{LookupSource, Multiplexer};
pub use payload::{LookupResponse, UpstreamTweet};
pub use session::{Session, SessionEvent, SessionState};
