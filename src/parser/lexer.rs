//! Lexer for bracketed prompt templates using logos
//!
//! Only the characters with meaning inside a placeholder are tokens of their
//! own. Everything else is lexed as a `Chunk`, so every input lexes fully.

use logos::Logos;

use super::ast::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("|")]
    Pipe,

    // Plain text between delimiters
    #[regex(r"[^\[\]|]+")]
    Chunk,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Chunk), span))
}
