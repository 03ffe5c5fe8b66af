//! User observation rows

use sqlx::FromRow;

/// One observation of a user
///
/// `id` is the surrogate (monotonic per observation); `user_id` is the
/// stable external id. `created_at` is stored but never leaves the API.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub user_id: i64,
    pub screen_name: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub followers: i64,
    pub total_tweets: i64,
    pub following: i64,
    pub created_at: Option<i64>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_banner_url: Option<String>,
    pub protected: bool,
    pub beta: bool,
}

/// Insert form of [`User`]
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub user_id: i64,
    pub screen_name: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub followers: i64,
    pub total_tweets: i64,
    pub following: i64,
    pub created_at: Option<i64>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_banner_url: Option<String>,
    pub protected: bool,
    pub beta: bool,
}

impl NewUser {
    /// Minimal observation, mostly for seeding
    pub fn new(user_id: i64, screen_name: impl Into<String>, beta: bool) -> Self {
        Self {
            user_id,
            screen_name: screen_name.into(),
            beta,
            ..Default::default()
        }
    }
}
