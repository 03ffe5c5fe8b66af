//! Follow-edge store
//!
//! Edges live in two tables shaped like wide-column partitions: `edges`
//! keyed `(to_user, id)` for follower listings and `edges_inspect` keyed
//! `(to_user, from_user, id)` for pairwise exploration. Reads never join
//! against the relational tables.

use async_trait::async_trait;
use pacsocial_timeline::IdWindow;
use sqlx::{QueryBuilder, Sqlite};

use crate::db::Archive;
use crate::error::Result;
use crate::models::Edge;

/// Edge storage backend
#[async_trait]
pub trait EdgeStore: Send + Sync {
    /// Write an edge to both layouts
    async fn insert(&self, edge: &Edge) -> Result<()>;

    /// Followers of `to_user` with ids in `window`, newest first
    async fn followers(&self, to_user: i64, window: IdWindow, limit: u32) -> Result<Vec<Edge>>;

    /// Edges from `from_user` to `to_user` with ids in `window`, newest first
    async fn explore(
        &self,
        to_user: i64,
        from_user: i64,
        window: IdWindow,
        limit: u32,
    ) -> Result<Vec<Edge>>;
}

/// [`EdgeStore`] on the archive's SQLite file
#[derive(Debug, Clone)]
pub struct SqliteEdgeStore {
    archive: Archive,
}

impl SqliteEdgeStore {
    pub fn new(archive: Archive) -> Self {
        Self { archive }
    }

    fn push_window(qb: &mut QueryBuilder<'_, Sqlite>, window: IdWindow, limit: u32) {
        qb.push(" AND id >= ").push_bind(window.min_inclusive);
        if let Some(max) = window.max_exclusive {
            qb.push(" AND id < ").push_bind(max);
        }
        qb.push(" ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(limit));
    }
}

#[async_trait]
impl EdgeStore for SqliteEdgeStore {
    async fn insert(&self, edge: &Edge) -> Result<()> {
        let mut tx = self.archive.pool().begin().await?;

        sqlx::query(
            "INSERT OR REPLACE INTO edges (to_user, id, from_user, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(edge.to_user)
        .bind(edge.id)
        .bind(edge.from_user)
        .bind(edge.timestamp)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT OR REPLACE INTO edges_inspect (to_user, from_user, id, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(edge.to_user)
        .bind(edge.from_user)
        .bind(edge.id)
        .bind(edge.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn followers(&self, to_user: i64, window: IdWindow, limit: u32) -> Result<Vec<Edge>> {
        if window.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT id, from_user, to_user, timestamp FROM edges WHERE to_user = ",
        );
        qb.push_bind(to_user);
        Self::push_window(&mut qb, window, limit);

        let edges = qb
            .build_query_as::<Edge>()
            .fetch_all(self.archive.pool())
            .await?;
        Ok(edges)
    }

    async fn explore(
        &self,
        to_user: i64,
        from_user: i64,
        window: IdWindow,
        limit: u32,
    ) -> Result<Vec<Edge>> {
        if window.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT id, from_user, to_user, timestamp FROM edges_inspect WHERE to_user = ",
        );
        qb.push_bind(to_user)
            .push(" AND from_user = ")
            .push_bind(from_user);
        Self::push_window(&mut qb, window, limit);

        let edges = qb
            .build_query_as::<Edge>()
            .fetch_all(self.archive.pool())
            .await?;
        Ok(edges)
    }
}
