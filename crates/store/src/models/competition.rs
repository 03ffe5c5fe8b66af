//! Teams and guesses

use pacsocial_timeline::GuessRecord;

/// A competing team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// Insert form of [`Team`]; the passcode is hashed before it is stored
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub passcode: String,
}

/// An immutable submission with its guessed user ids in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub id: i64,
    pub team_id: i64,
    pub timestamp: i64,
    /// Submitted during the beta phase
    pub beta: bool,
    pub user_ids: Vec<i64>,
}

impl Guess {
    pub fn record(&self) -> GuessRecord {
        GuessRecord {
            timestamp: self.timestamp,
            user_ids: self.user_ids.clone(),
        }
    }
}
