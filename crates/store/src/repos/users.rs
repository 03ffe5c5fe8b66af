//! User observation repository

use async_trait::async_trait;
use pacsocial_search::{ScreenNameResolver, SearchError};
use pacsocial_timeline::ScanBounds;
use sqlx::{QueryBuilder, Sqlite};

use crate::db::Archive;
use crate::error::Result;
use crate::filter::push_scan_bounds;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    archive: &'a Archive,
}

impl<'a> UserRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Record a new observation, returning its surrogate id
    pub async fn insert(&self, user: &NewUser) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, screen_name, full_name, bio, followers, total_tweets,
                following, created_at, location, website, profile_image_url, profile_banner_url,
                protected, beta)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.user_id)
        .bind(&user.screen_name)
        .bind(&user.full_name)
        .bind(&user.bio)
        .bind(user.followers)
        .bind(user.total_tweets)
        .bind(user.following)
        .bind(user.created_at)
        .bind(&user.location)
        .bind(&user.website)
        .bind(&user.profile_image_url)
        .bind(&user.profile_banner_url)
        .bind(user.protected)
        .bind(user.beta)
        .execute(self.archive.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Latest visible observation per user within scan bounds, newest first
    pub async fn list_latest(
        &self,
        bounds: &ScanBounds,
        in_beta: bool,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<User>> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT * FROM users WHERE id IN (SELECT MAX(id) FROM users WHERE beta = ",
        );
        qb.push_bind(in_beta);
        push_scan_bounds(&mut qb, "id", bounds);
        qb.push(" GROUP BY user_id) ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let users = qb
            .build_query_as::<User>()
            .fetch_all(self.archive.pool())
            .await?;
        Ok(users)
    }

    /// Latest visible observation of one user within scan bounds
    pub async fn latest(
        &self,
        user_id: i64,
        bounds: &ScanBounds,
        in_beta: bool,
    ) -> Result<Option<User>> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM users WHERE user_id = ");
        qb.push_bind(user_id).push(" AND beta = ").push_bind(in_beta);
        push_scan_bounds(&mut qb, "id", bounds);
        qb.push(" ORDER BY id DESC LIMIT 1");

        let user = qb
            .build_query_as::<User>()
            .fetch_optional(self.archive.pool())
            .await?;
        Ok(user)
    }

    /// Whether any observation of the user is visible in this phase
    pub async fn is_visible(&self, user_id: i64, in_beta: bool) -> Result<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE user_id = ? AND beta = ? LIMIT 1")
                .bind(user_id)
                .bind(in_beta)
                .fetch_optional(self.archive.pool())
                .await?;
        Ok(found.is_some())
    }

    /// Stable id of the visible user carrying `screen_name`
    pub async fn resolve_screen_name(&self, screen_name: &str, in_beta: bool) -> Result<Option<i64>> {
        let user_id: Option<i64> = sqlx::query_scalar(
            "SELECT user_id FROM users WHERE screen_name = ? AND beta = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(screen_name)
        .bind(in_beta)
        .fetch_optional(self.archive.pool())
        .await?;
        Ok(user_id)
    }
}

/// Mention resolver gated on the reader's phase
pub struct ScreenNames<'a> {
    archive: &'a Archive,
    in_beta: bool,
}

impl<'a> ScreenNames<'a> {
    pub fn new(archive: &'a Archive, in_beta: bool) -> Self {
        Self { archive, in_beta }
    }
}

#[async_trait]
impl ScreenNameResolver for ScreenNames<'_> {
    async fn resolve_screen_name(
        &self,
        screen_name: &str,
    ) -> pacsocial_search::Result<Option<i64>> {
        UserRepo::new(self.archive)
            .resolve_screen_name(screen_name, self.in_beta)
            .await
            .map_err(|e| SearchError::Resolve(e.to_string()))
    }
}
