//! Query tokens

use std::fmt;

/// One lexical token
///
/// The lexer only ever produces [`Token::Char`] for plain characters; the
/// joiner turns runs of them into [`Token::Word`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `:`
    Colon,
    /// `@`
    Mention,
    /// `#`
    Hashtag,
    /// ` `, the implicit OR between clauses
    Or,
    /// `+`, reserved
    And,
    /// `(`, reserved
    OpenParen,
    /// `)`, reserved
    CloseParen,
    /// A single plain character
    Char(char),
    /// A run of plain characters
    Word(String),
}

impl Token {
    /// Kind name used in syntax errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Colon => "colon",
            Self::Mention => "mention",
            Self::Hashtag => "hashtag",
            Self::Or => "separator",
            Self::And => "and",
            Self::OpenParen => "opening parenthesis",
            Self::CloseParen => "closing parenthesis",
            Self::Char(_) => "character",
            Self::Word(_) => "string",
        }
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colon => f.write_str("':'"),
            Self::Mention => f.write_str("'@'"),
            Self::Hashtag => f.write_str("'#'"),
            Self::Or => f.write_str("' '"),
            Self::And => f.write_str("'+'"),
            Self::OpenParen => f.write_str("'('"),
            Self::CloseParen => f.write_str("')'"),
            Self::Char(c) => write!(f, "'{}'", c),
            Self::Word(w) => write!(f, "'{}'", w),
        }
    }
}
