//! PacSocial Archive Store
//!
//! SQLite persistence (through `sqlx`) for the archived activity and the
//! competition layer.
//!
//! | Table | Contents |
//! |-------|----------|
//! | `users` | One row per user observation, `beta` partition flag |
//! | `tweets`, `tweet_entities` | Tweets with enrichment columns and typed spans |
//! | `scans` | Structural crawls bounding visible ids |
//! | `teams`, `guesses`, `guess_users`, `bots` | Competition state |
//! | `edges`, `edges_inspect` | Follow edges, see [`EdgeStore`] |
//!
//! # Usage
//!
//! ```ignore
//! use pacsocial_store::Archive;
//!
//! let archive = Archive::open("data/archive.db", 5).await?;
//! let user = archive.users().latest(42, &bounds, true).await?;
//! ```

pub mod db;
pub mod edges;
pub mod error;
mod filter;
pub mod models;
pub mod repos;

#[cfg(test)]
mod competition_test;
#[cfg(test)]
mod users_test;

pub use db::Archive;
pub use edges::{EdgeStore, SqliteEdgeStore};
pub use error::{Result, StoreError};
pub use models::{
    Edge, Enrichment, EnrichmentUpdate, Guess, NewScan, NewTeam, NewTweet, NewUser, Scan, Team,
    Tweet, TweetEntity, User,
};
pub use repos::{
    BotRepo, CommitStats, EnrichmentRepo, GuessRepo, ScanRepo, ScreenNames, TeamRepo, TimeBound,
    TweetQuery, TweetRepo, UserRepo,
};

impl Archive {
    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(self)
    }

    pub fn tweets(&self) -> TweetRepo<'_> {
        TweetRepo::new(self)
    }

    pub fn scans(&self) -> ScanRepo<'_> {
        ScanRepo::new(self)
    }

    pub fn teams(&self) -> TeamRepo<'_> {
        TeamRepo::new(self)
    }

    pub fn guesses(&self) -> GuessRepo<'_> {
        GuessRepo::new(self)
    }

    pub fn bots(&self) -> BotRepo<'_> {
        BotRepo::new(self)
    }

    pub fn enrichment(&self) -> EnrichmentRepo<'_> {
        EnrichmentRepo::new(self)
    }

    /// Mention resolver for a reader in (or out of) the beta phase
    pub fn screen_names(&self, in_beta: bool) -> ScreenNames<'_> {
        ScreenNames::new(self, in_beta)
    }
}
