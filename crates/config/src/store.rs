//! Relational store configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Store configuration
///
/// # Example
///
/// ```toml
/// [store]
/// path = "~/.pacsocial/archive.db"
/// max_connections = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the SQLite archive
    /// Default: "~/.pacsocial/archive.db" (expanded at runtime)
    pub path: Option<PathBuf>,

    /// Connection pool size
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            expand_tilde(path)
        } else {
            dirs::home_dir()
                .map(|h| h.join(".pacsocial").join("archive.db"))
                .unwrap_or_else(|| PathBuf::from("./data/archive.db"))
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    path.to_str()
        .and_then(|s| s.strip_prefix("~/"))
        .and_then(|stripped| dirs::home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_kept() {
        let config: StoreConfig = toml::from_str(r#"path = "/var/lib/pacsocial.db""#).unwrap();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/pacsocial.db")
        );
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde(&PathBuf::from("~/archive.db"));
        assert!(!expanded.to_str().unwrap().starts_with('~'));
    }
}
