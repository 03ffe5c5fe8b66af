//! PacSocial Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid config: the competition anchors default to the
//! dates of the archived run and the store lives under the home directory.
//!
//! # Parsing
//!
//! ```
//! use pacsocial_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[api_server]\nport = 8080").unwrap();
//! assert_eq!(config.api_server.port, 8080);
//! ```
//!
//! # Example
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [api_server]
//! port = 5000
//!
//! [store]
//! path = "/var/lib/pacsocial/archive.db"
//!
//! [[backfill.credentials]]
//! key = "consumer-key"
//! secret = "consumer-secret"
//! ```

mod api_server;
mod backfill;
mod competition;
mod error;
mod logging;
mod store;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use api_server::ApiServerConfig;
pub use backfill::{BackfillConfig, Credential};
pub use competition::{
    CompetitionConfig, DEFAULT_BETA_START, DEFAULT_COMPETITION_END, DEFAULT_COMPETITION_START,
    DEFAULT_DETECTION_END, DEFAULT_DETECTION_START, DEFAULT_PAGE_SIZE, GENEROUS_PAGE_SIZE_BOUND,
};
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, filter_directive};
pub use store::StoreConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// HTTP server bind settings
    pub api_server: ApiServerConfig,

    /// Competition timeline anchors and paging limits
    pub competition: CompetitionConfig,

    /// Archive database settings
    pub store: StoreConfig,

    /// Enrichment backfill settings
    pub backfill: BackfillConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.competition.validate()?;
        self.backfill.validate()?;
        if self.store.max_connections == 0 {
            return Err(ConfigError::invalid(
                "store",
                "max_connections",
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.api_server.port, 5000);
        assert_eq!(config.competition.detection_end, DEFAULT_DETECTION_END);
        assert!(config.backfill.credentials.is_empty());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[api_server]
host = "127.0.0.1"
port = 8080

[competition]
default_page_size = 100
max_page_size = 1000

[store]
path = "/tmp/archive.db"
max_connections = 2

[backfill]
flush_every = 5

[[backfill.credentials]]
key = "k"
secret = "s"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.api_server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.competition.max_page_size, 1000);
        assert_eq!(config.store.max_connections, 2);
        assert_eq!(config.backfill.flush_every, 5);
        assert_eq!(config.backfill.credentials.len(), 1);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("[api_server\nport = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validation_runs_on_parse() {
        let result = Config::from_str("[store]\nmax_connections = 0");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api_server]\nport = 9000").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_server.port, 9000);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/pacsocial.toml");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
