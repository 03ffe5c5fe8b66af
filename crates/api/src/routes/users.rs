//! User routes
//!
//! | Endpoint | Paging | Notes |
//! |----------|--------|-------|
//! | `GET /user[/near/{vtime}]` | `X-Cursor` | Latest observation per user |
//! | `GET /user/{user_id}[/near/{vtime}]` | - | `404` when not visible |
//! | `GET /user/{user_id}/tweets[/near/{vtime}]` | `X-Since-ID` | Author timeline |
//!
//! User reads are bounded by the nearest `user-info` scan.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
};
use pacsocial_store::{TimeBound, TweetQuery};
use pacsocial_timeline::ScanType;
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::extract::{Paging, Temporal, Timeline};
use crate::formatters::{TweetView, UserView};
use crate::response::{Listing, observed_headers};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(list_users))
        .route("/user/near/{vtime}", get(list_users))
        .route("/user/{user_id}", get(get_user))
        .route("/user/{user_id}/near/{vtime}", get(get_user))
        .route("/user/{user_id}/tweets", get(user_tweets))
        .route("/user/{user_id}/tweets/near/{vtime}", get(user_tweets))
}

async fn list_users(
    State(state): State<AppState>,
    temporal: Temporal,
    Paging(cursor): Paging,
) -> Result<Listing<UserView>> {
    let bounds = state
        .archive
        .scans()
        .bounds(ScanType::UserInfo, temporal.vtime)
        .await?;
    let users = state
        .archive
        .users()
        .list_latest(&bounds, temporal.in_beta(), cursor.offset, cursor.size)
        .await?;

    Ok(Listing::new(users.iter().map(UserView::from).collect())
        .with_cursor(&cursor)
        .with_observed(&bounds))
}

async fn get_user(
    State(state): State<AppState>,
    temporal: Temporal,
    Path(path): Path<UserPath>,
) -> Result<(HeaderMap, Json<UserView>)> {
    let bounds = state
        .archive
        .scans()
        .bounds(ScanType::UserInfo, temporal.vtime)
        .await?;
    let user = state
        .archive
        .users()
        .latest(path.user_id, &bounds, temporal.in_beta())
        .await?
        .ok_or_else(|| ApiError::not_found("user", path.user_id))?;

    Ok((observed_headers(&bounds), Json(UserView::from(&user))))
}

async fn user_tweets(
    State(state): State<AppState>,
    temporal: Temporal,
    Timeline(window): Timeline,
    Path(path): Path<UserPath>,
) -> Result<Listing<TweetView>> {
    let in_beta = temporal.in_beta();
    if !state.archive.users().is_visible(path.user_id, in_beta).await? {
        return Err(ApiError::not_found("user", path.user_id));
    }

    let tweets = state
        .archive
        .tweets()
        .list(&TweetQuery {
            window,
            since_timestamp: temporal.moment.competition_start,
            until: TimeBound::AtOrBefore(temporal.vtime),
            in_beta,
            authors: vec![path.user_id],
            filter: None,
        })
        .await?;

    Ok(Listing::new(tweets.iter().map(TweetView::from).collect()))
}
