//! JSON shapes of archive rows

use std::collections::BTreeMap;

use pacsocial_store::{Edge, Guess, Tweet, User};
use pacsocial_timeline::{Bonus, Moment, format_pdt};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserView {
    pub id: i64,
    pub user_id: i64,
    pub screen_name: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub followers: i64,
    pub total_tweets: i64,
    /// Account creation time is never published
    pub timestamp: Option<i64>,
    pub following: i64,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image_url: Option<String>,
    pub profile_banner_url: Option<String>,
    pub protected: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_id: user.user_id,
            screen_name: user.screen_name.clone(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            followers: user.followers,
            total_tweets: user.total_tweets,
            timestamp: None,
            following: user.following,
            location: user.location.clone(),
            website: user.website.clone(),
            profile_image_url: user.profile_image_url.clone(),
            profile_banner_url: user.profile_banner_url.clone(),
            protected: user.protected,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntityView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TweetView {
    pub id: i64,
    pub user_id: i64,
    pub timestamp: i64,
    pub text: String,
    pub entities: Vec<EntityView>,
    pub is_retweet: Option<bool>,
    pub retweet_user_id: Option<i64>,
    pub retweet_status_id: Option<i64>,
    pub retweet_count: Option<i64>,
    pub favorites_count: Option<i64>,
    pub in_reply_to_user_id: Option<i64>,
    pub in_reply_to_status_id: Option<i64>,
    pub in_reply_to_screen_name: Option<String>,
    pub coordinates: Option<String>,
    pub source: Option<String>,
    pub deleted: Option<bool>,
}

impl From<&Tweet> for TweetView {
    fn from(tweet: &Tweet) -> Self {
        Self {
            id: tweet.tweet_id,
            user_id: tweet.user_id,
            timestamp: tweet.timestamp,
            text: tweet.text.clone(),
            entities: tweet
                .entities
                .iter()
                .map(|e| EntityView {
                    kind: e.kind.as_str(),
                    text: e.text.clone(),
                })
                .collect(),
            is_retweet: tweet.is_retweet,
            retweet_user_id: tweet.retweet_user_id,
            retweet_status_id: tweet.retweet_status_id,
            retweet_count: tweet.retweet_count,
            favorites_count: tweet.favorites_count,
            in_reply_to_user_id: tweet.in_reply_to_user_id,
            in_reply_to_status_id: tweet.in_reply_to_status_id,
            in_reply_to_screen_name: tweet.in_reply_to_screen_name.clone(),
            coordinates: tweet.coordinates.clone(),
            source: tweet.source.clone(),
            deleted: tweet.deleted,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EdgeView {
    pub id: i64,
    pub from_user: i64,
    pub to_user: i64,
    pub timestamp: i64,
}

impl From<&Edge> for EdgeView {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id,
            from_user: edge.from_user,
            to_user: edge.to_user,
            timestamp: edge.timestamp,
        }
    }
}

/// A guess with its per-user scores
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GuessView {
    pub guess_id: i64,
    pub timestamp: i64,
    pub guesses: Vec<i64>,
    pub scores: BTreeMap<i64, f64>,
}

impl GuessView {
    pub fn new(guess: &Guess, scores: BTreeMap<i64, f64>) -> Self {
        Self {
            guess_id: guess.id,
            timestamp: guess.timestamp,
            guesses: guess.user_ids.clone(),
            scores,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BonusView {
    pub finished: bool,
    pub bonus: i64,
}

impl From<Bonus> for BonusView {
    fn from(bonus: Bonus) -> Self {
        Self {
            finished: bonus.finished,
            bonus: bonus.bonus,
        }
    }
}

// ============================================================================
// Clock
// ============================================================================

/// One instant in both time frames
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Instant {
    pub alpha: i64,
    pub alpha_str: String,
    #[serde(rename = "virtual")]
    pub virtual_time: i64,
    pub virtual_str: String,
}

impl Instant {
    fn at_virtual(moment: &Moment, virtual_time: i64) -> Self {
        let alpha = moment.to_alpha(virtual_time);
        Self {
            alpha,
            alpha_str: format_pdt(alpha),
            virtual_time,
            virtual_str: format_pdt(virtual_time),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClockView {
    pub now: Instant,
    pub minimum: Instant,
    pub anchor: i64,
    pub alpha_str: String,
}

impl ClockView {
    pub fn new(moment: &Moment, vtime: i64) -> Self {
        Self {
            now: Instant::at_virtual(moment, vtime),
            minimum: Instant::at_virtual(moment, moment.competition_start),
            anchor: moment.anchor,
            alpha_str: format_pdt(moment.anchor),
        }
    }
}
