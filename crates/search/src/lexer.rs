//! Character lexer and word joiner

use crate::token::Token;

/// Emit one token per character
pub fn lex(input: &str) -> Vec<Token> {
    input
        .chars()
        .map(|c| match c {
            ':' => Token::Colon,
            '@' => Token::Mention,
            '#' => Token::Hashtag,
            ' ' => Token::Or,
            other => Token::Char(other),
        })
        .collect()
}

/// Merge maximal runs of [`Token::Char`] into [`Token::Word`], preserving order
pub fn join(tokens: Vec<Token>) -> Vec<Token> {
    let mut joined = Vec::with_capacity(tokens.len());
    let mut word = String::new();

    for token in tokens {
        match token {
            Token::Char(c) => word.push(c),
            other => {
                if !word.is_empty() {
                    joined.push(Token::Word(std::mem::take(&mut word)));
                }
                joined.push(other);
            }
        }
    }
    if !word.is_empty() {
        joined.push(Token::Word(word));
    }

    joined
}
