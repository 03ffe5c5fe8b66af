//! Staged compilation with a debug trace

use crate::error::Result;
use crate::filter::TweetFilter;
use crate::lexer::{join, lex};
use crate::predicate::{ScreenNameResolver, Term, first_pass};

/// Result of a successful compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub terms: Vec<Term>,
    pub filter: TweetFilter,
}

/// One query, compiled once per request
///
/// The trace of every stage reached is kept on the instance, so it can be
/// read after [`Search::compile`] returns, including after a syntax error.
#[derive(Debug, Clone)]
pub struct Search {
    query: String,
    trace: Vec<String>,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            trace: Vec::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Stage snapshots in order
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub async fn compile<R>(&mut self, resolver: &R) -> Result<Compiled>
    where
        R: ScreenNameResolver + ?Sized,
    {
        self.trace.clear();
        self.trace.push(format!("1. Parsing \"{}\"", self.query));

        let tokens = lex(&self.query);
        self.trace.push(format!("2. Lexed \"{:?}\"", tokens));

        let joined = join(tokens);
        self.trace.push(format!("3. Joined \"{:?}\"", joined));

        let terms = first_pass(&joined, resolver).await?;
        self.trace.push(format!("4. First Pass \"{:?}\"", terms));

        let filter = TweetFilter::apply(&terms);
        Ok(Compiled { terms, filter })
    }
}
