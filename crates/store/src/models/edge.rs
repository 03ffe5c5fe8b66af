//! Follow edges

use sqlx::FromRow;

/// `from_user` follows `to_user`; `id` is the crawl sequence number
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Edge {
    pub id: i64,
    pub from_user: i64,
    pub to_user: i64,
    pub timestamp: i64,
}
