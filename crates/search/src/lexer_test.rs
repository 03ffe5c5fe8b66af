//! Tests for lexing and joining

use crate::lexer::{join, lex};
use crate::token::Token;

fn word(s: &str) -> Token {
    Token::Word(s.to_string())
}

#[test]
fn test_lex_empty() {
    assert!(lex("").is_empty());
    assert!(join(lex("")).is_empty());
}

#[test]
fn test_lex_one_token_per_char() {
    let tokens = lex("#a b");
    assert_eq!(
        tokens,
        vec![Token::Hashtag, Token::Char('a'), Token::Or, Token::Char('b')]
    );
}

#[test]
fn test_lex_keeps_last_char() {
    let tokens = lex("xyz");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2], Token::Char('z'));
}

#[test]
fn test_reserved_operators_lex_as_chars() {
    assert_eq!(
        lex("(+)"),
        vec![Token::Char('('), Token::Char('+'), Token::Char(')')]
    );
}

#[test]
fn test_join_full_query() {
    let joined = join(lex("#foo @bar url:baz qux"));
    assert_eq!(
        joined,
        vec![
            Token::Hashtag,
            word("foo"),
            Token::Or,
            Token::Mention,
            word("bar"),
            Token::Or,
            word("url"),
            Token::Colon,
            word("baz"),
            Token::Or,
            word("qux"),
        ]
    );
}

#[test]
fn test_join_unicode() {
    assert_eq!(join(lex("#café")), vec![Token::Hashtag, word("café")]);
}

#[test]
fn test_join_adjacent_separators() {
    assert_eq!(
        join(lex("a  b")),
        vec![word("a"), Token::Or, Token::Or, word("b")]
    );
}
