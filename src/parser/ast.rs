//! Syntax tree types for bracketed prompt templates

use crate::field::FieldType;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A node with its byte span in the template
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A top-level piece of a template: literal text or one `[...]` token
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// Literal text, including any unmatched brackets
    Text,
    /// A matched `[...]` pair
    Placeholder(PlaceholderToken),
}

impl Piece {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Piece::Placeholder(_))
    }
}

/// A matched `[...]` token
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderToken {
    /// Trimmed text before the first `|`; may be empty for `[]`
    pub name: String,
    /// Span of the text between the brackets
    pub inner: Span,
}

/// Result of scanning a template: pieces in order plus bracket anomalies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub pieces: Vec<Spanned<Piece>>,
    /// Offsets of `[` that never got closed
    pub unclosed: Vec<usize>,
    /// Offsets of `]` with no open `[`
    pub stray: Vec<usize>,
}

impl Template {
    /// Iterate placeholder tokens with their full `[...]` spans
    pub fn placeholders(&self) -> impl Iterator<Item = (&PlaceholderToken, &Span)> {
        self.pieces.iter().filter_map(|p| match &p.node {
            Piece::Placeholder(token) => Some((token, &p.span)),
            Piece::Text => None,
        })
    }
}

/// Metadata parsed from `name|type|required|default|opt1,opt2`
///
/// Absent positions stay `None` so callers can fall back to the field
/// definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPlaceholder {
    pub name: String,
    /// Raw type text as written in the template
    pub field_type: Option<String>,
    pub required: Option<bool>,
    pub default_value: Option<String>,
    pub options: Option<Vec<String>>,
}

impl ParsedPlaceholder {
    /// The embedded type, if it names a known field type
    pub fn known_type(&self) -> Option<FieldType> {
        self.field_type.as_deref().and_then(FieldType::parse)
    }
}
