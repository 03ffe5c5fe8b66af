//! PacSocial Search
//!
//! A compact query language over archived tweets:
//!
//! ```text
//! #news @someone url:example.com free text
//! ```
//!
//! Spaces separate clauses, and every clause is OR'ed together. Compilation
//! runs in four stages, each recorded in a debug trace:
//!
//! 1. **Parsing**: the raw input
//! 2. **Lexed**: one token per character
//! 3. **Joined**: runs of plain characters merged into words
//! 4. **First Pass**: `#word`, `@word` and `url:word` recognised as entity
//!    predicates, remaining words as text predicates
//!
//! The result is a [`TweetFilter`] the store renders into its own predicate
//! language. `+` (AND) and parentheses are reserved but not compiled yet;
//! the lexer treats them as plain characters.
//!
//! # Example
//!
//! ```ignore
//! let mut search = Search::new("#news @pac");
//! let compiled = search.compile(&store).await?;
//! let tweets = store.search_tweets(&compiled.filter, ...).await?;
//! ```

pub mod compiler;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod predicate;
pub mod token;

#[cfg(test)]
mod lexer_test;

pub use compiler::{Compiled, Search};
pub use error::{Result, SearchError};
pub use filter::{EntityKind, EntityMatch, Match, TweetFilter};
pub use lexer::{join, lex};
pub use predicate::{ScreenNameResolver, Term, first_pass};
pub use token::Token;
