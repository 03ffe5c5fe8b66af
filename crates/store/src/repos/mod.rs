//! Repositories over the archive database

mod bots;
mod enrichment;
mod guesses;
mod scans;
mod teams;
mod tweets;
mod users;

pub use bots::BotRepo;
pub use enrichment::{CommitStats, EnrichmentRepo};
pub use guesses::GuessRepo;
pub use scans::ScanRepo;
pub use teams::TeamRepo;
pub use tweets::{TimeBound, TweetQuery, TweetRepo};
pub use users::{ScreenNames, UserRepo};
