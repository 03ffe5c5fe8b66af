//! Bearer passcode authentication against the team directory

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{AuthError, Result};
use crate::password::{passcode_tag, verify_passcode};

/// Upper bound on an accepted bearer value
const MAX_TOKEN_SIZE: usize = 1024;

/// A team id with its stored passcode hash and lookup tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCredential {
    pub team_id: i64,
    pub passcode_hash: String,
    pub passcode_tag: String,
}

/// Source of team credentials
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Credentials whose `passcode_tag` equals `tag`
    async fn team_credentials(&self, tag: &str) -> Result<Vec<TeamCredential>>;
}

/// Extract the passcode from an `Authorization` header value
///
/// Accepts `Bearer <passcode>` or the bare passcode. Empty or oversized
/// values yield no passcode.
pub fn bearer_token(header: &str) -> Option<&str> {
    if header.len() > MAX_TOKEN_SIZE + 7 {
        return None;
    }
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves a bearer passcode to a team id
#[derive(Clone)]
pub struct TeamAuthenticator {
    directory: Arc<dyn TeamDirectory>,
}

impl std::fmt::Debug for TeamAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamAuthenticator").finish_non_exhaustive()
    }
}

impl TeamAuthenticator {
    pub fn new(directory: Arc<dyn TeamDirectory>) -> Self {
        Self { directory }
    }

    /// Authenticate the raw `Authorization` header value, if any
    ///
    /// An absent header is [`AuthError::MissingToken`]; a present one that
    /// carries no usable passcode is [`AuthError::UnknownPasscode`].
    pub async fn authenticate(&self, header: Option<&str>) -> Result<i64> {
        let header = header.ok_or(AuthError::MissingToken)?;
        let passcode = bearer_token(header).ok_or(AuthError::UnknownPasscode)?;

        let tag = passcode_tag(passcode)?;
        let candidates = self.directory.team_credentials(&tag).await?;
        if candidates.is_empty() {
            return Err(AuthError::UnknownPasscode);
        }

        // Argon2 is memory-hard; keep it off the async workers
        let passcode = passcode.to_string();
        tokio::task::spawn_blocking(move || verify_candidates(&passcode, &candidates))
            .await
            .map_err(|e| AuthError::Hash(format!("verification task failed: {}", e)))?
    }
}

fn verify_candidates(passcode: &str, candidates: &[TeamCredential]) -> Result<i64> {
    for credential in candidates {
        match verify_passcode(passcode, &credential.passcode_hash) {
            Ok(true) => {
                debug!(team_id = credential.team_id, "team authenticated");
                return Ok(credential.team_id);
            }
            Ok(false) => {}
            // One unreadable row must not lock every team out
            Err(e) => warn!(team_id = credential.team_id, error = %e, "skipping team"),
        }
    }

    Err(AuthError::UnknownPasscode)
}
