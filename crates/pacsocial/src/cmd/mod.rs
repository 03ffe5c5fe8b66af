//! Command implementations for the PacSocial CLI

pub mod backfill;
pub mod bot;
pub mod serve;
pub mod team;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pacsocial_config::Config;
use pacsocial_store::Archive;
use tokio::signal;
use tracing::error;

/// Searched in order when `--config` is not given
const DEFAULT_CONFIG_PATHS: &[&str] = &["pacsocial.toml", "configs/pacsocial.toml"];

/// Load the configuration once for the whole process
///
/// An explicit path must exist. Otherwise the first default path that
/// exists is used, and built-in defaults when none does.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    for candidate in DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from) {
        if candidate.exists() {
            return Config::from_file(&candidate).with_context(|| {
                format!("failed to load configuration from {}", candidate.display())
            });
        }
    }

    Ok(Config::default())
}

/// Open the archive named by `[store]`
pub async fn open_archive(config: &Config) -> Result<Archive> {
    let path = config.store.database_path();
    Archive::open(&path, config.store.max_connections)
        .await
        .with_context(|| format!("failed to open archive at {}", path.display()))
}

/// Resolve on Ctrl+C or SIGTERM
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/pacsocial.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api_server]\nport = 7000").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.api_server.port, 7000);
    }

    #[tokio::test]
    async fn test_open_archive_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.path = Some(dir.path().join("nested").join("archive.db"));

        let archive = open_archive(&config).await.unwrap();
        archive.ping().await.unwrap();
        assert!(dir.path().join("nested").join("archive.db").exists());
    }
}
