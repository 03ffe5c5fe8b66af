//! HTTP client for the upstream platform API
//!
//! Application-only auth: a client-credentials token is exchanged for a
//! bearer token, which then authorizes bulk status lookups.

use std::time::Duration;

use async_trait::async_trait;
use pacsocial_config::{BackfillConfig, Credential};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConnectorError, Result};
use crate::payload::LookupResponse;

/// Upstream error code for an invalid or expired bearer token
pub const EXPIRED_TOKEN_CODE: i64 = 89;

/// Operations a credential session needs from the upstream platform
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// Exchange a credential pair for a bearer token
    async fn issue_token(&self, credential: &Credential) -> Result<String>;

    /// Mapped bulk lookup of tweet ids
    async fn lookup(&self, token: &str, ids: &[i64]) -> Result<LookupResponse>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    code: i64,
    #[serde(default)]
    message: String,
}

/// reqwest-backed [`UpstreamApi`]
pub struct TwitterClient {
    client: reqwest::Client,
    api_url: String,
    token_url: String,
}

impl TwitterClient {
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails (e.g., TLS misconfiguration)
    pub fn new(config: &BackfillConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pacsocial-backfill/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConnectorError::Init(format!("upstream HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
        })
    }

    /// Map a non-success response onto the error the session layer acts on
    async fn handle_error_status(response: reqwest::Response) -> ConnectorError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => ConnectorError::RateLimited,
            reqwest::StatusCode::UNAUTHORIZED => classify_auth_error(&body),
            _ => ConnectorError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            },
        }
    }
}

/// A 401 is an expired token only when the first error carries code 89
fn classify_auth_error(body: &str) -> ConnectorError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match parsed.errors.first() {
        Some(entry) if entry.code == EXPIRED_TOKEN_CODE => ConnectorError::TokenExpired,
        Some(entry) => ConnectorError::AuthFailed(entry.message.clone()),
        None => ConnectorError::AuthFailed(body.to_string()),
    }
}

#[async_trait]
impl UpstreamApi for TwitterClient {
    async fn issue_token(&self, credential: &Credential) -> Result<String> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&credential.key, Some(&credential.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error_status(response).await);
        }

        let token: TokenResponse = response.json().await?;
        debug!(key = %credential.key, "issued bearer token");
        Ok(token.access_token)
    }

    async fn lookup(&self, token: &str, ids: &[i64]) -> Result<LookupResponse> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/statuses/lookup.json", self.api_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("id", joined.as_str()), ("map", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::handle_error_status(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_token_code() {
        let body = r#"{"errors":[{"code":89,"message":"Invalid or expired token."}]}"#;
        assert!(matches!(classify_auth_error(body), ConnectorError::TokenExpired));
    }

    #[test]
    fn test_other_auth_errors() {
        let body = r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#;
        match classify_auth_error(body) {
            ConnectorError::AuthFailed(msg) => assert_eq!(msg, "Could not authenticate you."),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            classify_auth_error("not json"),
            ConnectorError::AuthFailed(_)
        ));
    }

    #[test]
    fn test_client_from_config() {
        let config = BackfillConfig {
            api_url: "http://localhost:9/1.1/".to_string(),
            ..Default::default()
        };
        let client = TwitterClient::new(&config).unwrap();
        assert_eq!(client.api_url, "http://localhost:9/1.1");
    }
}
