//! Edge routes
//!
//! Follow edges bounded by the nearest `followers` scan and the timeline
//! window. The target user must be visible in the current phase.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use pacsocial_timeline::{IdWindow, ScanBounds, ScanType, TimelineWindow};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::extract::{Temporal, Timeline};
use crate::formatters::EdgeView;
use crate::response::Listing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FollowersPath {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ExplorePath {
    pub from_user: i64,
    pub to_user: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/edges/followers/{user_id}", get(followers))
        .route("/edges/followers/{user_id}/near/{vtime}", get(followers))
        .route("/edges/explore/{from_user}/to/{to_user}", get(explore))
        .route(
            "/edges/explore/{from_user}/to/{to_user}/near/{vtime}",
            get(explore),
        )
}

/// Id window for edges of a visible `to_user`, or `404`
async fn edge_window(
    state: &AppState,
    temporal: &Temporal,
    window: &TimelineWindow,
    to_user: i64,
) -> Result<(IdWindow, ScanBounds)> {
    if !state.archive.users().is_visible(to_user, temporal.in_beta()).await? {
        return Err(ApiError::not_found("user", to_user));
    }

    let bounds = state
        .archive
        .scans()
        .bounds(ScanType::Followers, temporal.vtime)
        .await?;
    Ok((IdWindow::intersect(window, &bounds), bounds))
}

async fn followers(
    State(state): State<AppState>,
    temporal: Temporal,
    Timeline(window): Timeline,
    Path(path): Path<FollowersPath>,
) -> Result<Listing<EdgeView>> {
    let (ids, bounds) = edge_window(&state, &temporal, &window, path.user_id).await?;
    let edges = state.edges.followers(path.user_id, ids, window.count).await?;

    Ok(Listing::new(edges.iter().map(EdgeView::from).collect()).with_observed(&bounds))
}

async fn explore(
    State(state): State<AppState>,
    temporal: Temporal,
    Timeline(window): Timeline,
    Path(path): Path<ExplorePath>,
) -> Result<Listing<EdgeView>> {
    let (ids, bounds) = edge_window(&state, &temporal, &window, path.to_user).await?;
    let edges = state
        .edges
        .explore(path.to_user, path.from_user, ids, window.count)
        .await?;

    Ok(Listing::new(edges.iter().map(EdgeView::from).collect()).with_observed(&bounds))
}
