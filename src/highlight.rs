//! Segmentation of templates for highlighted display

use std::collections::HashMap;

use serde::Serialize;

use crate::field::{find_field, Field};
use crate::i18n::Language;
use crate::parser::{scan, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Text,
    Placeholder,
}

/// One run of template text
///
/// Joining every segment's `content` in order gives back the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// `None` when no field definition matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl Segment {
    pub fn is_placeholder(&self) -> bool {
        self.kind == SegmentKind::Placeholder
    }
}

/// Split a template into text and placeholder segments
pub fn highlight_placeholders(template: &str, fields: &[Field]) -> Vec<Segment> {
    let by_name: HashMap<&str, &Field> = fields.iter().map(|f| (f.name.as_str(), f)).collect();

    scan(template)
        .pieces
        .into_iter()
        .map(|piece| {
            let content = template[piece.span].to_string();
            match piece.node {
                Piece::Text => Segment {
                    kind: SegmentKind::Text,
                    content,
                    field_name: None,
                    required: None,
                },
                Piece::Placeholder(token) => Segment {
                    kind: SegmentKind::Placeholder,
                    content,
                    required: by_name.get(token.name.as_str()).map(|f| f.required),
                    field_name: Some(token.name),
                },
            }
        })
        .collect()
}

/// Display name for a placeholder: the field's localized label, else the name
pub fn placeholder_display(name: &str, fields: &[Field], language: Language) -> String {
    find_field(fields, name)
        .and_then(|f| f.label.as_ref())
        .map(|label| label.localize(language))
        .filter(|label| !label.is_empty())
        .unwrap_or(name)
        .to_string()
}

/// Render segments as plain text with placeholders marked for a terminal
///
/// Required placeholders are wrapped in `«»`, others in `‹›`.
pub fn render_marked(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match (s.kind, s.required) {
            (SegmentKind::Text, _) => s.content.clone(),
            (SegmentKind::Placeholder, Some(true)) => format!("«{}»", s.content),
            (SegmentKind::Placeholder, _) => format!("‹{}›", s.content),
        })
        .collect()
}
