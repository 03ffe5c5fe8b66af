//! Credential sessions
//!
//! Each credential pair owns a bearer-token state machine. The state is a
//! plain value; [`SessionState::next`] computes transitions and the owning
//! [`Session`] performs the I/O around them.

use std::sync::Arc;

use pacsocial_config::Credential;
use tracing::info;

use crate::client::UpstreamApi;
use crate::error::{ConnectorError, Result};
use crate::payload::LookupResponse;

/// Token state of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No usable token; the next call requests one first
    #[default]
    Unauthorized,
    Authorized { token: String },
}

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TokenIssued(String),
    TokenExpired,
}

impl SessionState {
    pub fn next(self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::TokenIssued(token) => SessionState::Authorized { token },
            SessionEvent::TokenExpired => SessionState::Unauthorized,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authorized { token } => Some(token),
            SessionState::Unauthorized => None,
        }
    }
}

/// One credential pair talking to the upstream API
pub struct Session<A: ?Sized> {
    api: Arc<A>,
    credential: Credential,
    state: SessionState,
}

impl<A: UpstreamApi + ?Sized> Session<A> {
    pub fn new(api: Arc<A>, credential: Credential) -> Self {
        Self {
            api,
            credential,
            state: SessionState::Unauthorized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.credential.key
    }

    fn transition(&mut self, event: SessionEvent) {
        self.state = std::mem::take(&mut self.state).next(event);
    }

    /// Forward a lookup, refreshing the token first when unauthorized
    ///
    /// Returns `Ok(None)` when the token turned out to be expired; the
    /// session is then unauthorized and the caller is expected to retry.
    pub async fn lookup(&mut self, ids: &[i64]) -> Result<Option<LookupResponse>> {
        if self.state.token().is_none() {
            let token = self.api.issue_token(&self.credential).await?;
            self.transition(SessionEvent::TokenIssued(token));
        }

        let Some(token) = self.state.token() else {
            return Ok(None);
        };

        let result = self.api.lookup(token, ids).await;
        match result {
            Err(ConnectorError::TokenExpired) => {
                info!(key = %self.credential.key, "bearer token expired");
                self.transition(SessionEvent::TokenExpired);
                Ok(None)
            }
            other => other.map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let state = SessionState::default();
        assert_eq!(state.token(), None);

        let state = state.next(SessionEvent::TokenIssued("abc".into()));
        assert_eq!(state.token(), Some("abc"));

        let state = state.next(SessionEvent::TokenIssued("def".into()));
        assert_eq!(state.token(), Some("def"));

        assert_eq!(
            state.next(SessionEvent::TokenExpired),
            SessionState::Unauthorized
        );
    }
}
