//! Retry with capped exponential backoff
//!
//! The backfill is a long-running batch job, so transient failures are
//! retried without a giveup condition. Rate limits are not retried here;
//! they surface to the driver, which commits and sleeps on its own schedule.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;

/// Default first delay
pub const DEFAULT_BACKOFF_SEED_SECS: u64 = 2;

/// Default ceiling
pub const DEFAULT_BACKOFF_MAX_SECS: u64 = 64;

/// Backoff schedule: `seed, 2*seed, 4*seed, ...` capped at `max`
#[derive(Debug, Clone)]
pub struct Backoff {
    seed: Duration,
    max: Duration,
    attempt: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_BACKOFF_SEED_SECS),
            Duration::from_secs(DEFAULT_BACKOFF_MAX_SECS),
        )
    }
}

impl Backoff {
    pub fn new(seed: Duration, max: Duration) -> Self {
        Self {
            seed,
            max,
            attempt: 0,
        }
    }

    /// Delay before the next attempt; advances the schedule
    pub fn next_delay(&mut self) -> Duration {
        let factor = 1u32.checked_shl(self.attempt).unwrap_or(u32::MAX);
        let delay = self.seed.saturating_mul(factor).min(self.max);
        if delay < self.max {
            self.attempt += 1;
        }
        delay
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

/// Run `operation` until it yields a value or a non-transient error
///
/// `Ok(None)` means "no result this time" (an expired token was just
/// dropped) and is retried like a transient error.
pub async fn retry_with_backoff<F, Fut, T>(
    backoff: &mut Backoff,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    backoff.reset();
    loop {
        match operation().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                let delay = backoff.next_delay();
                debug!(
                    operation = operation_name,
                    delay_ms = delay.as_millis() as u64,
                    "no result, retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) if e.is_transient() => {
                let delay = backoff.next_delay();
                warn!(
                    operation = operation_name,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "request failed, retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectorError;

    #[test]
    fn test_backoff_doubles_to_ceiling() {
        let mut backoff = Backoff::default();
        let delays: Vec<u64> = (0..8).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 16, 32, 64, 64, 64]);

        backoff.reset();
        assert_eq!(backoff.next_delay().as_secs(), 2);
    }

    #[test]
    fn test_backoff_ceiling_below_seed_multiple() {
        let mut backoff = Backoff::new(Duration::from_secs(3), Duration::from_secs(10));
        let delays: Vec<u64> = (0..4).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![3, 6, 10, 10]);
    }

    #[tokio::test]
    async fn test_retry_until_value() {
        let mut backoff = Backoff::new(Duration::from_millis(1), Duration::from_millis(4));
        let mut calls = 0;
        let value = retry_with_backoff(&mut backoff, "test", || {
            calls += 1;
            let attempt = calls;
            async move {
                match attempt {
                    1 => Err(ConnectorError::TokenExpired),
                    2 => Ok(None),
                    _ => Ok(Some(attempt)),
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let mut backoff = Backoff::new(Duration::from_millis(1), Duration::from_millis(4));
        let mut calls = 0;
        let result: Result<()> = retry_with_backoff(&mut backoff, "test", || {
            calls += 1;
            async { Err(ConnectorError::RateLimited) }
        })
        .await;
        assert!(matches!(result, Err(ConnectorError::RateLimited)));
        assert_eq!(calls, 1);
    }
}
