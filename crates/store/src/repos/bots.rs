//! Ground-truth bot repository

use std::collections::HashSet;

use crate::db::Archive;
use crate::error::Result;

/// Bot repository
pub struct BotRepo<'a> {
    archive: &'a Archive,
}

impl<'a> BotRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Mark a user as a bot; re-adding updates the kill date
    pub async fn add(&self, user_id: i64, kill_date: Option<i64>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bots (user_id, kill_date) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET kill_date = excluded.kill_date
            "#,
        )
        .bind(user_id)
        .bind(kill_date)
        .execute(self.archive.pool())
        .await?;
        Ok(())
    }

    pub async fn ids(&self) -> Result<HashSet<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT user_id FROM bots")
            .fetch_all(self.archive.pool())
            .await?;
        Ok(ids.into_iter().collect())
    }
}
