//! Tweet repository

use std::collections::HashMap;

use pacsocial_search::{EntityKind, TweetFilter};
use pacsocial_timeline::TimelineWindow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::db::Archive;
use crate::error::{Result, StoreError};
use crate::filter::push_tweet_filter;
use crate::models::{NewTweet, Tweet, TweetEntity};

/// Upper time bound of a tweet listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    /// `timestamp <= t` (timelines at a requested virtual time)
    AtOrBefore(i64),
    /// `timestamp < t` (search up to the current virtual time)
    Before(i64),
}

/// Parameters of one tweet listing
#[derive(Debug, Clone)]
pub struct TweetQuery<'f> {
    pub window: TimelineWindow,
    /// Inclusive lower bound on `timestamp`
    pub since_timestamp: i64,
    pub until: TimeBound,
    /// Authors must be visible in this phase
    pub in_beta: bool,
    /// Restrict to these authors; empty means any
    pub authors: Vec<i64>,
    pub filter: Option<&'f TweetFilter>,
}

/// Tweet repository
pub struct TweetRepo<'a> {
    archive: &'a Archive,
}

impl<'a> TweetRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Insert a tweet and its entities atomically
    pub async fn insert(&self, tweet: &NewTweet) -> Result<()> {
        let mut tx = self.archive.pool().begin().await?;

        sqlx::query("INSERT INTO tweets (tweet_id, user_id, timestamp, text) VALUES (?, ?, ?, ?)")
            .bind(tweet.tweet_id)
            .bind(tweet.user_id)
            .bind(tweet.timestamp)
            .bind(&tweet.text)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if StoreError::is_unique_violation(&e) {
                    StoreError::already_exists("tweet", tweet.tweet_id.to_string())
                } else {
                    StoreError::Database(e)
                }
            })?;

        for entity in &tweet.entities {
            sqlx::query("INSERT INTO tweet_entities (tweet_id, type, text) VALUES (?, ?, ?)")
                .bind(tweet.tweet_id)
                .bind(entity.kind.as_str())
                .bind(&entity.text)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Newest-first page of visible tweets, entities loaded
    pub async fn list(&self, query: &TweetQuery<'_>) -> Result<Vec<Tweet>> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT t.* FROM tweets t WHERE t.timestamp >= ");
        qb.push_bind(query.since_timestamp);

        match query.until {
            TimeBound::AtOrBefore(t) => qb.push(" AND t.timestamp <= ").push_bind(t),
            TimeBound::Before(t) => qb.push(" AND t.timestamp < ").push_bind(t),
        };

        qb.push(" AND t.tweet_id > ").push_bind(query.window.since_id);
        if let Some(max_id) = query.window.max_id {
            qb.push(" AND t.tweet_id <= ").push_bind(max_id);
        }

        qb.push(" AND t.user_id IN (SELECT user_id FROM users WHERE beta = ")
            .push_bind(query.in_beta)
            .push(")");

        if !query.authors.is_empty() {
            qb.push(" AND t.user_id IN (");
            let mut ids = qb.separated(", ");
            for author in &query.authors {
                ids.push_bind(*author);
            }
            ids.push_unseparated(")");
        }

        if let Some(filter) = query.filter {
            push_tweet_filter(&mut qb, filter);
        }

        qb.push(" ORDER BY t.tweet_id DESC LIMIT ")
            .push_bind(i64::from(query.window.count));

        let mut tweets = qb
            .build_query_as::<Tweet>()
            .fetch_all(self.archive.pool())
            .await?;
        self.load_entities(&mut tweets).await?;
        Ok(tweets)
    }

    /// Fetch one tweet by id with its entities
    pub async fn get(&self, tweet_id: i64) -> Result<Option<Tweet>> {
        let tweet = sqlx::query_as::<_, Tweet>("SELECT * FROM tweets WHERE tweet_id = ?")
            .bind(tweet_id)
            .fetch_optional(self.archive.pool())
            .await?;

        match tweet {
            Some(tweet) => {
                let mut tweets = vec![tweet];
                self.load_entities(&mut tweets).await?;
                Ok(tweets.pop())
            }
            None => Ok(None),
        }
    }

    async fn load_entities(&self, tweets: &mut [Tweet]) -> Result<()> {
        if tweets.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT tweet_id, type, text FROM tweet_entities WHERE tweet_id IN (");
        let mut ids = qb.separated(", ");
        for tweet in tweets.iter() {
            ids.push_bind(tweet.tweet_id);
        }
        ids.push_unseparated(") ORDER BY id");

        let rows = qb.build().fetch_all(self.archive.pool()).await?;

        let mut by_tweet: HashMap<i64, Vec<TweetEntity>> = HashMap::new();
        for row in rows {
            let tweet_id: i64 = row.try_get("tweet_id")?;
            let kind: String = row.try_get("type")?;
            let kind = EntityKind::parse(&kind)
                .ok_or_else(|| StoreError::invalid("tweet_entities.type", kind.clone()))?;
            by_tweet
                .entry(tweet_id)
                .or_default()
                .push(TweetEntity::new(kind, row.try_get::<String, _>("text")?));
        }

        for tweet in tweets.iter_mut() {
            tweet.entities = by_tweet.remove(&tweet.tweet_id).unwrap_or_default();
        }
        Ok(())
    }
}
