//! Database connection and schema management
//!
//! One SQLite file holds the relational archive (users, tweets, entities,
//! scans, competition tables) and the two wide-column style edge tables.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Archive database handle
///
/// Cheap to clone; all clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Archive {
    pool: SqlitePool,
}

impl Archive {
    /// Open or create an archive at the given path
    ///
    /// Creates the database file, parent directories and tables if missing.
    pub async fn open<P: AsRef<Path>>(path: P, max_connections: u32) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let archive = Self { pool };
        archive.init_schema().await?;

        info!(path = %path.display(), "archive opened");
        Ok(archive)
    }

    /// Create an in-memory archive (tests and demos)
    ///
    /// A single connection that never expires, since every connection to
    /// `:memory:` is a separate database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let archive = Self { pool };
        archive.init_schema().await?;
        Ok(archive)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Liveness check
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("archive schema initialized");
        Ok(())
    }
}

/// Schema, applied idempotently on open
const SCHEMA: &[&str] = &[
    // One row per observation of a user; `id` is the surrogate
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        screen_name TEXT NOT NULL,
        full_name TEXT,
        bio TEXT,
        followers INTEGER NOT NULL DEFAULT 0,
        total_tweets INTEGER NOT NULL DEFAULT 0,
        following INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER,
        location TEXT,
        website TEXT,
        profile_image_url TEXT,
        profile_banner_url TEXT,
        protected INTEGER NOT NULL DEFAULT 0,
        beta INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_users_user_id ON users(user_id, id)",
    "CREATE INDEX IF NOT EXISTS idx_users_screen_name ON users(screen_name)",
    r#"
    CREATE TABLE IF NOT EXISTS tweets (
        tweet_id INTEGER PRIMARY KEY,
        user_id INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        text TEXT NOT NULL,
        is_retweet INTEGER,
        retweet_user_id INTEGER,
        retweet_status_id INTEGER,
        retweet_count INTEGER,
        favorites_count INTEGER,
        in_reply_to_user_id INTEGER,
        in_reply_to_status_id INTEGER,
        in_reply_to_screen_name TEXT,
        coordinates TEXT,
        source TEXT,
        deleted INTEGER
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tweets_user ON tweets(user_id, tweet_id)",
    "CREATE INDEX IF NOT EXISTS idx_tweets_timestamp ON tweets(timestamp)",
    r#"
    CREATE TABLE IF NOT EXISTS tweet_entities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tweet_id INTEGER NOT NULL REFERENCES tweets(tweet_id),
        type TEXT NOT NULL,
        text TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_entities_tweet ON tweet_entities(tweet_id)",
    "CREATE INDEX IF NOT EXISTS idx_entities_match ON tweet_entities(type, text)",
    r#"
    CREATE TABLE IF NOT EXISTS scans (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL,
        window_start INTEGER NOT NULL,
        window_end INTEGER NOT NULL,
        ref_start INTEGER,
        ref_end INTEGER,
        CHECK (ref_start IS NULL OR ref_end IS NULL OR ref_start <= ref_end)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_scans_type_end ON scans(type, window_end)",
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL,
        passcode_hash TEXT NOT NULL,
        passcode_tag TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_teams_tag ON teams(passcode_tag)",
    r#"
    CREATE TABLE IF NOT EXISTS guesses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_id INTEGER NOT NULL REFERENCES teams(id),
        timestamp INTEGER NOT NULL,
        beta INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_guesses_team ON guesses(team_id)",
    r#"
    CREATE TABLE IF NOT EXISTS guess_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        guess_id INTEGER NOT NULL REFERENCES guesses(id),
        user_id INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_guess_users_guess ON guess_users(guess_id)",
    // Guesses are an append-only audit trail
    r#"
    CREATE TRIGGER IF NOT EXISTS guesses_no_update BEFORE UPDATE ON guesses
    BEGIN SELECT RAISE(ABORT, 'guesses are immutable'); END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS guesses_no_delete BEFORE DELETE ON guesses
    BEGIN SELECT RAISE(ABORT, 'guesses are immutable'); END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS guess_users_no_update BEFORE UPDATE ON guess_users
    BEGIN SELECT RAISE(ABORT, 'guess users are immutable'); END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS guess_users_no_delete BEFORE DELETE ON guess_users
    BEGIN SELECT RAISE(ABORT, 'guess users are immutable'); END
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bots (
        user_id INTEGER PRIMARY KEY,
        kill_date INTEGER
    )
    "#,
    // Follow edges keyed for reverse lookups by target
    r#"
    CREATE TABLE IF NOT EXISTS edges (
        to_user INTEGER NOT NULL,
        id INTEGER NOT NULL,
        from_user INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        PRIMARY KEY (to_user, id)
    ) WITHOUT ROWID
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS edges_inspect (
        to_user INTEGER NOT NULL,
        from_user INTEGER NOT NULL,
        id INTEGER NOT NULL,
        timestamp INTEGER NOT NULL,
        PRIMARY KEY (to_user, from_user, id)
    ) WITHOUT ROWID
    "#,
];
