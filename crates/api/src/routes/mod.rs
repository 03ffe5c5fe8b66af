//! API routes
//!
//! Resource-grouped HTTP route handlers. Every listing that reads at a
//! virtual time also answers on a `/near/{vtime}` variant.

pub mod clock;
pub mod edges;
pub mod guesses;
pub mod ops;
pub mod tweets;
pub mod users;

use axum::Router;
use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .expose_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS]);

    Router::new()
        // Operations (no auth)
        .merge(ops::routes())
        .merge(clock::routes())
        .merge(users::routes())
        .merge(tweets::routes())
        .merge(edges::routes())
        // Competition (bearer passcode)
        .merge(guesses::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
