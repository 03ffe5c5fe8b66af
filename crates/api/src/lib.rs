//! PacSocial API
//!
//! HTTP surface over the social archive.
//!
//! # Usage
//!
//! ```ignore
//! use pacsocial_api::{AppState, PageLimits, build_router};
//!
//! let state = AppState::new(archive, clock, PageLimits { default_size: 500, max_size: 15000 });
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Endpoints
//!
//! ## Time
//! - `GET /clock[/{vtime}]` - Alpha and virtual time, now and at the start
//!
//! ## Archive
//! - `GET /user[/near/{vtime}]` - Users, cursor paged
//! - `GET /user/{user_id}[/near/{vtime}]` - One user
//! - `GET /user/{user_id}/tweets[/near/{vtime}]` - Author timeline
//! - `GET /tweets[/near/{vtime}]` - Every visible tweet
//! - `GET|POST /search?q=...&users=1,2` - Compiled search
//! - `GET /edges/followers/{user_id}[/near/{vtime}]` - Followers
//! - `GET /edges/explore/{from}/to/{to}[/near/{vtime}]` - Edges between two users
//!
//! ## Competition
//! - `GET|PUT|POST /guess`, `GET /guess/{guess_id}`, `GET /score`
//!
//! # Paging Headers
//!
//! Timelines read `X-Since-ID`, `X-Max-ID` and `X-Since-Count`. Cursor listings
//! read `X-Cursor` / `X-Cursor-Size` and answer with `X-Cursor-Next`,
//! `X-Cursor-Previous` and `X-Cursor-Current`. Scan-bounded reads echo the
//! scan window in `X-Observed-Min` / `X-Observed-Max`.

pub mod error;
pub mod extract;
pub mod formatters;
pub mod response;
pub mod routes;
pub mod state;

// Re-exports
pub use error::{ApiError, ErrorResponse, Result};
pub use response::Listing;
pub use routes::build_router;
pub use state::{AppState, PageLimits};
