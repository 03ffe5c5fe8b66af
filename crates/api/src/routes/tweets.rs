//! Tweet routes
//!
//! `GET /tweets[/near/{vtime}]` pages every visible tweet up to the virtual
//! time. `GET|POST /search` compiles `q` into a filter and reads up to the
//! current virtual time; send `X-Debug` to get the compiler trace back in
//! `X-Debug-Trace`, on a rejected query as well.

use axum::response::{IntoResponse, Response};
use axum::{Router, extract::State, routing::get};
use pacsocial_search::Search;
use pacsocial_store::{TimeBound, TweetQuery};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::extract::{DebugMode, Temporal, Timeline, Values};
use crate::formatters::TweetView;
use crate::response::{Listing, X_DEBUG_TRACE, trace_header};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tweets", get(list_tweets))
        .route("/tweets/near/{vtime}", get(list_tweets))
        .route("/search", get(search).post(search))
}

async fn list_tweets(
    State(state): State<AppState>,
    temporal: Temporal,
    Timeline(window): Timeline,
) -> Result<Listing<TweetView>> {
    let tweets = state
        .archive
        .tweets()
        .list(&TweetQuery {
            window,
            since_timestamp: temporal.moment.competition_start,
            until: TimeBound::AtOrBefore(temporal.vtime),
            in_beta: temporal.in_beta(),
            authors: Vec::new(),
            filter: None,
        })
        .await?;

    Ok(Listing::new(tweets.iter().map(TweetView::from).collect()))
}

/// Comma-separated author ids
fn parse_authors(raw: Option<&str>) -> Result<Vec<i64>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| ApiError::bad_request(format!("invalid user id '{}'", id)))
        })
        .collect()
}

async fn search(
    State(state): State<AppState>,
    temporal: Temporal,
    Timeline(window): Timeline,
    DebugMode(debug_mode): DebugMode,
    values: Values,
) -> Result<Response> {
    let query = values
        .get("q")
        .ok_or_else(|| ApiError::bad_request("missing query parameter 'q'"))?;
    let authors = parse_authors(values.get("users"))?;
    let in_beta = temporal.in_beta();

    let mut search = Search::new(query);
    let compiled = match search.compile(&state.archive.screen_names(in_beta)).await {
        Ok(compiled) => compiled,
        Err(e) => {
            let mut response = ApiError::from(e).into_response();
            if debug_mode && let Some(trace) = trace_header(search.trace()) {
                response.headers_mut().insert(X_DEBUG_TRACE, trace);
            }
            return Ok(response);
        }
    };
    debug!(query, terms = compiled.terms.len(), "compiled search");

    let tweets = state
        .archive
        .tweets()
        .list(&TweetQuery {
            window,
            since_timestamp: temporal.moment.competition_start,
            until: TimeBound::Before(temporal.moment.current_virtual_time()),
            in_beta,
            authors,
            filter: Some(&compiled.filter),
        })
        .await?;

    Ok(Listing::new(tweets.iter().map(TweetView::from).collect())
        .with_trace(debug_mode.then(|| search.trace()))
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_authors() {
        assert_eq!(parse_authors(None).unwrap(), Vec::<i64>::new());
        assert_eq!(parse_authors(Some("1, 2,,3")).unwrap(), vec![1, 2, 3]);
        assert!(parse_authors(Some("1,bob")).is_err());
    }
}
