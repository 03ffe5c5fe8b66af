//! Logging configuration

use serde::Deserialize;

/// Crates whose chatter is capped at `warn` regardless of the chosen level.
const QUIET_TARGETS: &[&str] = &["sqlx", "hyper", "reqwest"];

/// Log level
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to tracing level filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output (default)
    #[default]
    Console,
    /// JSON structured logging, one object per line
    Json,
}

/// Logging configuration
///
/// # Example
///
/// ```toml
/// [log]
/// level = "info"
/// format = "console"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Output format (console, json)
    pub format: LogFormat,
}

/// Build an `EnvFilter`-compatible directive for a base level
///
/// HTTP client and driver crates stay at `warn` so request-level noise does
/// not drown the backfill progress lines.
pub fn filter_directive(level: &str) -> String {
    let mut directive = level.to_string();
    for target in QUIET_TARGETS {
        directive.push_str(&format!(",{}=warn", target));
    }
    directive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty() {
        let config: LogConfig = toml::from_str("").unwrap();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Console);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
level = "debug"
format = "json"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_filter_directive_quiets_clients() {
        let directive = filter_directive(LogLevel::Debug.as_str());
        assert!(directive.starts_with("debug,"));
        assert!(directive.contains("sqlx=warn"));
        assert!(directive.contains("reqwest=warn"));
    }
}
