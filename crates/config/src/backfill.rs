//! Enrichment backfill configuration

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// One application credential pair for the upstream platform API
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub key: String,
    pub secret: String,
}

/// Backfill configuration
///
/// # Example
///
/// ```toml
/// [backfill]
/// api_url = "https://api.twitter.com/1.1"
/// token_url = "https://api.twitter.com/oauth2/token"
/// page_size = 100
/// flush_every = 10
///
/// [[backfill.credentials]]
/// key = "consumer-key"
/// secret = "consumer-secret"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackfillConfig {
    /// Application credentials, one session per entry
    pub credentials: Vec<Credential>,
    /// Base URL of the upstream REST API
    pub api_url: String,
    /// URL of the client-credentials token endpoint
    pub token_url: String,
    /// Ids per lookup call (the upstream batch limit)
    pub page_size: u32,
    /// Pages processed between commits
    pub flush_every: u32,
    /// Pause after the multiplexer reports every session rate limited
    pub rate_limit_sleep_secs: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// First backoff delay after a transport failure
    pub backoff_seed_secs: u64,
    /// Backoff ceiling
    pub backoff_max_secs: u64,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            credentials: Vec::new(),
            api_url: "https://api.twitter.com/1.1".to_string(),
            token_url: "https://api.twitter.com/oauth2/token".to_string(),
            page_size: 100,
            flush_every: 10,
            rate_limit_sleep_secs: 10,
            request_timeout_secs: 10,
            backoff_seed_secs: 2,
            backoff_max_secs: 64,
        }
    }
}

impl BackfillConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid("backfill", "page_size", "must be positive"));
        }
        if self.flush_every == 0 {
            return Err(ConfigError::invalid("backfill", "flush_every", "must be positive"));
        }
        if self.backoff_seed_secs == 0 || self.backoff_seed_secs > self.backoff_max_secs {
            return Err(ConfigError::invalid(
                "backfill",
                "backoff_seed_secs",
                "must be positive and not exceed backoff_max_secs",
            ));
        }
        for (i, cred) in self.credentials.iter().enumerate() {
            if cred.key.is_empty() || cred.secret.is_empty() {
                return Err(ConfigError::invalid(
                    "backfill",
                    "credentials",
                    format!("entry {} has an empty key or secret", i),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackfillConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.backoff_seed_secs, 2);
        assert_eq!(config.backoff_max_secs, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_parse() {
        let toml = r#"
[[credentials]]
key = "a"
secret = "b"

[[credentials]]
key = "c"
secret = "d"
"#;
        let config: BackfillConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.credentials.len(), 2);
        assert_eq!(config.credentials[1].key, "c");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let toml = r#"
[[credentials]]
key = "a"
secret = ""
"#;
        let config: BackfillConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }
}
