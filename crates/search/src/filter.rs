//! Compiled tweet filter
//!
//! A flat disjunction: a tweet matches when any single [`Match`] holds. An
//! empty filter matches everything, so a blank query degrades to the plain
//! timeline.

use std::fmt;

use crate::predicate::Term;

/// Type of a decomposed tweet entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Hashtag,
    Url,
    Mention,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hashtag => "hashtag",
            Self::Url => "url",
            Self::Mention => "mention",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hashtag" => Some(Self::Hashtag),
            "url" => Some(Self::Url),
            "mention" => Some(Self::Mention),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity attached to a tweet, as the filter sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMatch {
    pub kind: EntityKind,
    pub text: String,
}

/// One disjunct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    /// The tweet has an entity of `kind` whose text equals `text`
    Entity { kind: EntityKind, text: String },
    /// The tweet text contains the substring
    TextContains(String),
}

/// OR of every predicate from the first pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweetFilter {
    pub any_of: Vec<Match>,
}

impl TweetFilter {
    /// Build from first-pass terms; passthrough tokens are ignored
    ///
    /// Mention entities store the mentioned user's id as their text.
    pub fn apply(terms: &[Term]) -> Self {
        let any_of = terms
            .iter()
            .filter_map(|term| match term {
                Term::Hashtag(tag) => Some(Match::Entity {
                    kind: EntityKind::Hashtag,
                    text: tag.clone(),
                }),
                Term::Mention(user_id) => Some(Match::Entity {
                    kind: EntityKind::Mention,
                    text: user_id.to_string(),
                }),
                Term::Url(url) => Some(Match::Entity {
                    kind: EntityKind::Url,
                    text: url.clone(),
                }),
                Term::Text(text) => Some(Match::TextContains(text.clone())),
                Term::Passthrough(_) => None,
            })
            .collect();

        Self { any_of }
    }

    pub fn matches_all(&self) -> bool {
        self.any_of.is_empty()
    }

    /// Evaluate against one tweet in memory
    pub fn matches(&self, text: &str, entities: &[EntityMatch]) -> bool {
        if self.matches_all() {
            return true;
        }
        self.any_of.iter().any(|m| match m {
            Match::Entity { kind, text: wanted } => entities
                .iter()
                .any(|e| e.kind == *kind && e.text == *wanted),
            Match::TextContains(needle) => text.contains(needle.as_str()),
        })
    }
}
