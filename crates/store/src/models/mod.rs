//! Archive row types

mod competition;
mod edge;
mod scan;
mod tweet;
mod user;

pub use competition::{Guess, NewTeam, Team};
pub use edge::Edge;
pub use scan::{NewScan, Scan};
pub use tweet::{Enrichment, EnrichmentUpdate, NewTweet, Tweet, TweetEntity};
pub use user::{NewUser, User};
