//! Clock routes
//!
//! Where the competition stands on both timelines.

use axum::{Json, Router, routing::get};

use crate::extract::Temporal;
use crate::formatters::ClockView;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clock", get(clock))
        .route("/clock/{vtime}", get(clock))
}

async fn clock(temporal: Temporal) -> Json<ClockView> {
    Json(ClockView::new(&temporal.moment, temporal.vtime))
}
