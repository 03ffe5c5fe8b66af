//! Guess endpoints
//!
//! # Auth Requirements
//!
//! | Endpoint | Auth | Notes |
//! |----------|------|-------|
//! | `GET /guess` | Bearer passcode | Every guess of the team, scored |
//! | `GET /guess/{guess_id}` | Bearer passcode | `404` for other teams' guesses |
//! | `PUT /guess`, `POST /guess` | Bearer passcode | `429` after detection ends |
//! | `GET /score` | Bearer passcode | Early-finish bonus |
//!
//! Scores reveal ground truth only outside the beta phase.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use pacsocial_store::Guess;
use pacsocial_timeline::{GuessRecord, score_bonus, score_guess};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::extract::{Team, Temporal, Values};
use crate::formatters::{BonusView, GuessView};
use crate::response::Listing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GuessPath {
    pub guess_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/guess", get(list_guesses).put(submit_guess).post(submit_guess))
        .route("/guess/{guess_id}", get(get_guess))
        .route("/score", get(score))
}

async fn scored(
    state: &AppState,
    temporal: &Temporal,
    guesses: &[Guess],
) -> Result<Vec<GuessView>> {
    let bots = state.archive.bots().ids().await?;
    let reveal = !temporal.in_beta();

    Ok(guesses
        .iter()
        .map(|g| GuessView::new(g, score_guess(&g.user_ids, &bots, reveal)))
        .collect())
}

async fn list_guesses(
    State(state): State<AppState>,
    temporal: Temporal,
    Team(team_id): Team,
) -> Result<Listing<GuessView>> {
    let guesses = state.archive.guesses().list_for_team(team_id).await?;
    Ok(Listing::new(scored(&state, &temporal, &guesses).await?))
}

async fn get_guess(
    State(state): State<AppState>,
    temporal: Temporal,
    Team(team_id): Team,
    Path(path): Path<GuessPath>,
) -> Result<Json<GuessView>> {
    let guess = state
        .archive
        .guesses()
        .get_for_team(team_id, path.guess_id)
        .await?
        .ok_or_else(|| ApiError::not_found("guess", path.guess_id))?;

    let mut views = scored(&state, &temporal, std::slice::from_ref(&guess)).await?;
    views
        .pop()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("guess", path.guess_id))
}

/// One guessed id: a JSON number or a numeric string
fn parse_bot_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid bot id '{}'", raw)))
}

/// Bot ids from `{"bots": [..]}` or repeated `bots=` fields
fn bot_ids(values: &Values) -> Result<Vec<i64>> {
    let mut ids = Vec::new();

    if let Some(json) = values.json() {
        let listed = json
            .get("bots")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::bad_request("body must be {\"bots\": [ids]}"))?;
        for item in listed {
            let id = match item {
                Value::Number(n) => n
                    .as_i64()
                    .ok_or_else(|| ApiError::bad_request(format!("invalid bot id {}", n)))?,
                Value::String(s) => parse_bot_id(s)?,
                other => return Err(ApiError::bad_request(format!("invalid bot id {}", other))),
            };
            ids.push(id);
        }
    }

    for raw in values.all("bots") {
        ids.push(parse_bot_id(raw)?);
    }

    if ids.is_empty() {
        return Err(ApiError::bad_request("a guess must name at least one bot"));
    }
    Ok(ids)
}

async fn submit_guess(
    State(state): State<AppState>,
    temporal: Temporal,
    Team(team_id): Team,
    values: Values,
) -> Result<Json<GuessView>> {
    // Open through beta and detection; beta scores stay hidden until reveal
    if temporal.moment.detection_over() {
        return Err(ApiError::GuessingClosed("the detection phase has ended".to_string()));
    }

    let ids = bot_ids(&values)?;
    let guess = state
        .archive
        .guesses()
        .record(team_id, temporal.moment.now, temporal.in_beta(), &ids)
        .await?;

    let mut views = scored(&state, &temporal, std::slice::from_ref(&guess)).await?;
    views
        .pop()
        .map(Json)
        .ok_or_else(|| ApiError::Internal("recorded guess vanished".to_string()))
}

async fn score(
    State(state): State<AppState>,
    temporal: Temporal,
    Team(team_id): Team,
) -> Result<Json<BonusView>> {
    let guesses = state.archive.guesses().list_for_team(team_id).await?;
    let records: Vec<GuessRecord> = guesses.iter().map(Guess::record).collect();
    let bots = state.archive.bots().ids().await?;

    Ok(Json(score_bonus(&records, &bots, temporal.moment.detection_end).into()))
}
