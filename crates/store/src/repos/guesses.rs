//! Guess repository
//!
//! Guesses and their user rows are insert-only; triggers reject updates
//! and deletes.

use std::collections::HashMap;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::info;

use crate::db::Archive;
use crate::error::{Result, StoreError};
use crate::models::Guess;

/// Guess repository
pub struct GuessRepo<'a> {
    archive: &'a Archive,
}

impl<'a> GuessRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Record a guess and one row per named user in a single transaction
    pub async fn record(
        &self,
        team_id: i64,
        timestamp: i64,
        beta: bool,
        user_ids: &[i64],
    ) -> Result<Guess> {
        if user_ids.is_empty() {
            return Err(StoreError::invalid("bots", "a guess must name at least one user"));
        }

        let mut tx = self.archive.pool().begin().await?;

        let guess_id = sqlx::query("INSERT INTO guesses (team_id, timestamp, beta) VALUES (?, ?, ?)")
            .bind(team_id)
            .bind(timestamp)
            .bind(beta)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        for user_id in user_ids {
            sqlx::query("INSERT INTO guess_users (guess_id, user_id) VALUES (?, ?)")
                .bind(guess_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(team_id, guess_id, users = user_ids.len(), "recorded guess");

        Ok(Guess {
            id: guess_id,
            team_id,
            timestamp,
            beta,
            user_ids: user_ids.to_vec(),
        })
    }

    /// All guesses of a team, oldest first
    pub async fn list_for_team(&self, team_id: i64) -> Result<Vec<Guess>> {
        let rows = sqlx::query(
            "SELECT id, team_id, timestamp, beta FROM guesses WHERE team_id = ? ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(self.archive.pool())
        .await?;
        let mut guesses = rows
            .iter()
            .map(Self::row_to_guess)
            .collect::<Result<Vec<_>>>()?;

        let user_rows = sqlx::query(
            r#"
            SELECT gu.guess_id, gu.user_id FROM guess_users gu
            JOIN guesses g ON g.id = gu.guess_id
            WHERE g.team_id = ? ORDER BY gu.id
            "#,
        )
        .bind(team_id)
        .fetch_all(self.archive.pool())
        .await?;

        let mut by_guess: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in user_rows {
            by_guess
                .entry(row.try_get("guess_id")?)
                .or_default()
                .push(row.try_get("user_id")?);
        }
        for guess in &mut guesses {
            guess.user_ids = by_guess.remove(&guess.id).unwrap_or_default();
        }

        Ok(guesses)
    }

    /// One guess, only if it belongs to `team_id`
    pub async fn get_for_team(&self, team_id: i64, guess_id: i64) -> Result<Option<Guess>> {
        let row = sqlx::query(
            "SELECT id, team_id, timestamp, beta FROM guesses WHERE team_id = ? AND id = ?",
        )
        .bind(team_id)
        .bind(guess_id)
        .fetch_optional(self.archive.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut guess = Self::row_to_guess(&row)?;

        guess.user_ids =
            sqlx::query_scalar("SELECT user_id FROM guess_users WHERE guess_id = ? ORDER BY id")
                .bind(guess_id)
                .fetch_all(self.archive.pool())
                .await?;

        Ok(Some(guess))
    }

    fn row_to_guess(row: &SqliteRow) -> Result<Guess> {
        Ok(Guess {
            id: row.try_get("id")?,
            team_id: row.try_get("team_id")?,
            timestamp: row.try_get("timestamp")?,
            beta: row.try_get("beta")?,
            user_ids: Vec::new(),
        })
    }
}
