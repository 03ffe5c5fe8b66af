//! Session multiplexer
//!
//! Spreads lookups over every configured credential pair. A session is
//! skipped only when it reports a rate limit; any other outcome, success
//! or failure, is returned as is.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pacsocial_config::{BackfillConfig, Credential};
use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{TwitterClient, UpstreamApi};
use crate::error::{ConnectorError, Result};
use crate::payload::LookupResponse;
use crate::resilience::{Backoff, retry_with_backoff};
use crate::session::Session;

/// Anything the backfill driver can ask for a page of tweets
#[async_trait]
pub trait LookupSource: Send + Sync {
    /// Look up one page of ids
    ///
    /// Fails with [`ConnectorError::RateLimited`] when no capacity is left.
    async fn lookup(&self, ids: &[i64]) -> Result<LookupResponse>;
}

/// Round-robin over credential sessions, sticky to the last session that answered
pub struct Multiplexer<A: ?Sized> {
    sessions: Vec<Mutex<Session<A>>>,
    cursor: AtomicUsize,
    backoff: Backoff,
}

impl<A: UpstreamApi + ?Sized> Multiplexer<A> {
    pub fn new(api: Arc<A>, credentials: &[Credential], backoff: Backoff) -> Result<Self> {
        if credentials.is_empty() {
            return Err(ConnectorError::ConfigError(
                "backfill needs at least one credential".to_string(),
            ));
        }

        let sessions = credentials
            .iter()
            .map(|c| Mutex::new(Session::new(Arc::clone(&api), c.clone())))
            .collect();

        Ok(Self {
            sessions,
            cursor: AtomicUsize::new(0),
            backoff,
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// One pass over the sessions
    async fn lookup_once(&self, ids: &[i64]) -> Result<Option<LookupResponse>> {
        let count = self.sessions.len();
        let start = self.cursor.load(Ordering::Relaxed);

        for step in 0..count {
            let index = (start + step) % count;
            let mut session = self.sessions[index].lock().await;
            match session.lookup(ids).await {
                Err(ConnectorError::RateLimited) => {
                    debug!(key = %session.key(), "session rate limited, trying next");
                }
                other => {
                    self.cursor.store(index, Ordering::Relaxed);
                    return other;
                }
            }
        }

        Err(ConnectorError::RateLimited)
    }
}

impl Multiplexer<TwitterClient> {
    /// Sessions for every configured credential over one HTTP client
    pub fn from_config(config: &BackfillConfig) -> Result<Self> {
        let api = Arc::new(TwitterClient::new(config)?);
        let backoff = Backoff::new(
            Duration::from_secs(config.backoff_seed_secs),
            Duration::from_secs(config.backoff_max_secs),
        );
        Self::new(api, &config.credentials, backoff)
    }
}

#[async_trait]
impl<A: UpstreamApi + ?Sized + 'static> LookupSource for Multiplexer<A> {
    async fn lookup(&self, ids: &[i64]) -> Result<LookupResponse> {
        let mut backoff = self.backoff.clone();
        retry_with_backoff(&mut backoff, "lookup", || self.lookup_once(ids)).await
    }
}
