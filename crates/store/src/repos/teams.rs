//! Team repository

use async_trait::async_trait;
use pacsocial_auth::password::{hash_passcode, passcode_tag};
use pacsocial_auth::{AuthError, TeamCredential, TeamDirectory};
use sqlx::Row;
use tracing::info;

use crate::db::Archive;
use crate::error::{Result, StoreError};
use crate::models::{NewTeam, Team};

/// Team repository
pub struct TeamRepo<'a> {
    archive: &'a Archive,
}

impl<'a> TeamRepo<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self { archive }
    }

    /// Create a team, storing only the passcode hash and its lookup tag
    pub async fn create(&self, team: &NewTeam) -> Result<Team> {
        let passcode_hash = hash_passcode(&team.passcode)?;
        let tag = passcode_tag(&team.passcode)?;

        let result = sqlx::query(
            "INSERT INTO teams (name, passcode_hash, passcode_tag) VALUES (?, ?, ?)",
        )
        .bind(&team.name)
        .bind(&passcode_hash)
        .bind(&tag)
        .execute(self.archive.pool())
        .await
        .map_err(|e| {
            if StoreError::is_unique_violation(&e) {
                StoreError::already_exists("team", team.name.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        info!(team = %team.name, "created team");

        Ok(Team {
            id: result.last_insert_rowid(),
            name: team.name.clone(),
        })
    }

    pub async fn list(&self) -> Result<Vec<Team>> {
        let rows = sqlx::query("SELECT id, name FROM teams ORDER BY id")
            .fetch_all(self.archive.pool())
            .await?;

        rows.iter()
            .map(|row| -> Result<Team> {
                Ok(Team {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                })
            })
            .collect()
    }

    /// Credentials of the teams whose passcode carries `tag`
    pub async fn credentials(&self, tag: &str) -> Result<Vec<TeamCredential>> {
        let rows = sqlx::query(
            "SELECT id, passcode_hash, passcode_tag FROM teams WHERE passcode_tag = ? ORDER BY id",
        )
        .bind(tag)
        .fetch_all(self.archive.pool())
        .await?;

        rows.iter()
            .map(|row| -> Result<TeamCredential> {
                Ok(TeamCredential {
                    team_id: row.try_get("id")?,
                    passcode_hash: row.try_get("passcode_hash")?,
                    passcode_tag: row.try_get("passcode_tag")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl TeamDirectory for Archive {
    async fn team_credentials(&self, tag: &str) -> pacsocial_auth::Result<Vec<TeamCredential>> {
        TeamRepo::new(self)
            .credentials(tag)
            .await
            .map_err(|e| AuthError::Directory(e.to_string()))
    }
}
