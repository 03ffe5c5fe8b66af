//! First pass: entity predicates over joined tokens

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, SearchError};
use crate::token::Token;

const URL_KEYWORD: &str = "url";

/// Resolves `@screen_name` to the stable user id of a visible user
#[async_trait]
pub trait ScreenNameResolver: Send + Sync {
    /// `Ok(None)` when no visible user carries that screen name
    async fn resolve_screen_name(&self, screen_name: &str) -> Result<Option<i64>>;
}

/// Output of the first pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// `#tag`
    Hashtag(String),
    /// `@name`, resolved to a user id
    Mention(i64),
    /// `url:value`
    Url(String),
    /// A bare word, matched as a substring of the tweet text
    Text(String),
    /// Any other token, passed through and ignored by the filter
    Passthrough(Token),
}

impl Term {
    pub fn is_predicate(&self) -> bool {
        !matches!(self, Self::Passthrough(_))
    }
}

fn expect_word(next: Option<&Token>) -> Result<&str> {
    match next {
        Some(Token::Word(w)) => Ok(w),
        Some(other) => Err(SearchError::Syntax {
            expected: "string",
            found: other.to_string(),
        }),
        None => Err(SearchError::unexpected_end("string")),
    }
}

/// Recognise `url:<word>`, `#<word>` and `@<word>`; everything else passes through
///
/// A word after `#`, `@` or `url:` is mandatory. A mention that does not
/// resolve contributes nothing.
pub async fn first_pass<R>(tokens: &[Token], resolver: &R) -> Result<Vec<Term>>
where
    R: ScreenNameResolver + ?Sized,
{
    let mut terms = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i] {
            Token::Word(w) if w == URL_KEYWORD && tokens.get(i + 1) == Some(&Token::Colon) => {
                let url = expect_word(tokens.get(i + 2))?;
                terms.push(Term::Url(url.to_string()));
                i += 3;
            }
            Token::Hashtag => {
                let tag = expect_word(tokens.get(i + 1))?;
                terms.push(Term::Hashtag(tag.to_string()));
                i += 2;
            }
            Token::Mention => {
                let screen_name = expect_word(tokens.get(i + 1))?;
                match resolver.resolve_screen_name(screen_name).await? {
                    Some(user_id) => terms.push(Term::Mention(user_id)),
                    None => debug!(screen_name, "dropping unresolved mention"),
                }
                i += 2;
            }
            Token::Word(w) => {
                terms.push(Term::Text(w.clone()));
                i += 1;
            }
            other => {
                terms.push(Term::Passthrough(other.clone()));
                i += 1;
            }
        }
    }

    Ok(terms)
}
