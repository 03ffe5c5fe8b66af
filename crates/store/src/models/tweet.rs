//! Tweet rows, their entities and enrichment

use pacsocial_search::{EntityKind, EntityMatch};
use sqlx::FromRow;

/// A decomposed span of tweet text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetEntity {
    pub kind: EntityKind,
    /// Hashtag text, URL, or the mentioned user's id
    pub text: String,
}

impl TweetEntity {
    pub fn new(kind: EntityKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn as_match(&self) -> EntityMatch {
        EntityMatch {
            kind: self.kind,
            text: self.text.clone(),
        }
    }
}

/// A tweet with its entities loaded
///
/// Enrichment columns stay `None` until the backfill reaches the row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Tweet {
    pub tweet_id: i64,
    pub user_id: i64,
    pub timestamp: i64,
    pub text: String,
    pub is_retweet: Option<bool>,
    pub retweet_user_id: Option<i64>,
    pub retweet_status_id: Option<i64>,
    pub retweet_count: Option<i64>,
    pub favorites_count: Option<i64>,
    pub in_reply_to_user_id: Option<i64>,
    pub in_reply_to_status_id: Option<i64>,
    pub in_reply_to_screen_name: Option<String>,
    pub coordinates: Option<String>,
    pub source: Option<String>,
    pub deleted: Option<bool>,
    #[sqlx(skip)]
    pub entities: Vec<TweetEntity>,
}

/// Insert form of [`Tweet`]
#[derive(Debug, Clone, Default)]
pub struct NewTweet {
    pub tweet_id: i64,
    pub user_id: i64,
    pub timestamp: i64,
    pub text: String,
    pub entities: Vec<TweetEntity>,
}

impl NewTweet {
    pub fn new(tweet_id: i64, user_id: i64, timestamp: i64, text: impl Into<String>) -> Self {
        Self {
            tweet_id,
            user_id,
            timestamp,
            text: text.into(),
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, kind: EntityKind, text: impl Into<String>) -> Self {
        self.entities.push(TweetEntity::new(kind, text));
        self
    }
}

/// Fields fetched from the upstream API for a live tweet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub is_retweet: bool,
    pub retweet_user_id: Option<i64>,
    pub retweet_status_id: Option<i64>,
    pub retweet_count: Option<i64>,
    pub favorites_count: Option<i64>,
    pub in_reply_to_user_id: Option<i64>,
    pub in_reply_to_status_id: Option<i64>,
    pub in_reply_to_screen_name: Option<String>,
    pub coordinates: Option<String>,
    pub source: Option<String>,
}

/// One staged backfill write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentUpdate {
    /// The tweet is still served upstream
    Enriched { tweet_id: i64, fields: Enrichment },
    /// Upstream no longer serves the tweet
    Deleted { tweet_id: i64 },
}
