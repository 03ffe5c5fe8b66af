//! Guess scoring
//!
//! Every guessed id starts at [`DEFAULT_PENALTY`]. Once the beta phase is
//! over, ids that are ground-truth bots are overwritten with
//! [`CORRECT_REWARD`]. During beta nothing is revealed.

use std::collections::{BTreeMap, HashMap, HashSet};

pub const DEFAULT_PENALTY: f64 = -0.25;
pub const CORRECT_REWARD: f64 = 1.0;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// One submitted guess: when it landed and which user ids it named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub timestamp: i64,
    pub user_ids: Vec<i64>,
}

/// Score each named id
///
/// Duplicate ids collapse into one entry, so repeating an id never counts twice.
pub fn score_guess(user_ids: &[i64], bots: &HashSet<i64>, reveal: bool) -> BTreeMap<i64, f64> {
    user_ids
        .iter()
        .map(|&id| {
            let score = if reveal && bots.contains(&id) {
                CORRECT_REWARD
            } else {
                DEFAULT_PENALTY
            };
            (id, score)
        })
        .collect()
}

/// Competition bonus for one team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bonus {
    /// Every bot has been named at least once
    pub finished: bool,
    /// Whole days of early completion
    pub bonus: i64,
}

/// Compute the early-finish bonus over all of a team's guesses
///
/// The finishing time is the latest of the per-bot first-guess times. The
/// bonus is `ceil((detection_end - finish) / 86400) - 1`, floored at zero.
/// With no bots configured there is nothing to finish.
pub fn score_bonus(guesses: &[GuessRecord], bots: &HashSet<i64>, detection_end: i64) -> Bonus {
    if bots.is_empty() {
        return Bonus::default();
    }

    let mut first_seen: HashMap<i64, i64> = HashMap::new();
    for guess in guesses {
        for id in guess.user_ids.iter().filter(|id| bots.contains(id)) {
            first_seen
                .entry(*id)
                .and_modify(|t| *t = (*t).min(guess.timestamp))
                .or_insert(guess.timestamp);
        }
    }

    if first_seen.len() < bots.len() {
        return Bonus::default();
    }

    let finish = first_seen.values().copied().max().unwrap_or(detection_end);
    let remaining = detection_end - finish;
    let bonus = if remaining <= 0 {
        0
    } else {
        (remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY - 1
    };

    Bonus {
        finished: true,
        bonus,
    }
}
