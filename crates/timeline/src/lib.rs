//! PacSocial Timeline
//!
//! The pure, clock-driven core of the archive API:
//!
//! - **Clock**: maps wall-clock ("alpha") time onto the competition's virtual
//!   timeline, anchored on the current phase
//! - **Visibility**: beta partition and nearest-scan ID bounds
//! - **Pagination**: since/max timeline windows and `<offset>-<size>` cursors
//! - **Scoring**: per-guess scores and the early-finish bonus
//!
//! Everything here is a function of its inputs plus a [`Clock`]; nothing
//! touches storage. Tests drive time through [`FixedClock`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pacsocial_config::CompetitionConfig;
//! use pacsocial_timeline::{CompetitionClock, FixedClock};
//!
//! let config = CompetitionConfig::default();
//! let clock = CompetitionClock::new(&config, Arc::new(FixedClock::new(1_424_149_200)));
//! let moment = clock.moment();
//! assert!(!moment.in_beta());
//! assert_eq!(moment.to_alpha(moment.to_virtual(42)), 42);
//! ```

pub mod clock;
pub mod error;
pub mod pagination;
pub mod scoring;
pub mod visibility;

#[cfg(test)]
mod pagination_test;
#[cfg(test)]
mod scoring_test;

pub use clock::{Clock, CompetitionClock, FixedClock, Moment, Phase, SystemClock, format_pdt};
pub use error::{Result, TimelineError};
pub use pagination::{Cursor, CursorHeaders, TimelineWindow};
pub use scoring::{
    Bonus, CORRECT_REWARD, DEFAULT_PENALTY, GuessRecord, SECONDS_PER_DAY, score_bonus, score_guess,
};
pub use visibility::{IdWindow, ScanBounds, ScanType};
