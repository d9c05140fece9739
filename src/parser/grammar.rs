//! Template scanner and placeholder token grammar
//!
//! Scanning never fails. A `]` closes the nearest open `[`; an earlier `[`
//! that gets superseded, or one still open at end of input, stays literal
//! text and is recorded as unclosed.

use super::ast::{ParsedPlaceholder, Piece, PlaceholderToken, Spanned, Template};
use super::lexer::{lex, Token};

/// Scan a template into text and placeholder pieces
pub fn scan(source: &str) -> Template {
    let mut template = Template::default();
    let mut text_start = 0;
    let mut open: Option<usize> = None;

    for (token, span) in lex(source) {
        match token {
            Token::BracketOpen => {
                if let Some(previous) = open.replace(span.start) {
                    template.unclosed.push(previous);
                }
            }
            Token::BracketClose => match open.take() {
                Some(start) => {
                    if start > text_start {
                        template
                            .pieces
                            .push(Spanned::new(Piece::Text, text_start..start));
                    }
                    let inner = start + 1..span.start;
                    let name = placeholder_name(&source[inner.clone()]).to_string();
                    template.pieces.push(Spanned::new(
                        Piece::Placeholder(PlaceholderToken { name, inner }),
                        start..span.end,
                    ));
                    text_start = span.end;
                }
                None => template.stray.push(span.start),
            },
            Token::Pipe | Token::Chunk => {}
        }
    }

    if let Some(start) = open {
        template.unclosed.push(start);
    }
    if text_start < source.len() {
        template
            .pieces
            .push(Spanned::new(Piece::Text, text_start..source.len()));
    }

    template
}

/// The field name of a token's inner text: everything before the first `|`, trimmed
pub fn placeholder_name(inner: &str) -> &str {
    inner.split('|').next().unwrap_or_default().trim()
}

/// Parse the inner text of a token (without brackets)
///
/// Grammar: `name|type|required|defaultValue|option1,option2,...`
pub fn parse_placeholder(inner: &str) -> ParsedPlaceholder {
    let parts: Vec<&str> = inner.split('|').map(str::trim).collect();
    let part = |index: usize| parts.get(index).copied().filter(|p| !p.is_empty());

    ParsedPlaceholder {
        name: parts.first().copied().unwrap_or_default().to_string(),
        field_type: part(1).map(str::to_string),
        // Only these two spellings count as true
        required: part(2).map(|p| p == "required" || p == "true"),
        default_value: part(3).map(str::to_string),
        options: part(4).map(|p| p.split(',').map(|o| o.trim().to_string()).collect()),
    }
}
