//! Placeholder substitution

use tracing::trace;

use crate::parser::{scan, Piece};
use crate::values::ValueMap;

/// Replace each placeholder with its value
///
/// A placeholder with no value, or an empty one, is left in place verbatim.
/// Inserted values are never re-scanned.
pub fn fill_placeholders(template: &str, values: &ValueMap) -> String {
    let mut out = String::with_capacity(template.len());
    let mut unfilled = 0usize;

    for piece in scan(template).pieces {
        let raw = &template[piece.span.clone()];
        match &piece.node {
            Piece::Text => out.push_str(raw),
            Piece::Placeholder(token) => match values.get(&token.name) {
                Some(value) if !value.is_empty() => out.push_str(&value.flatten()),
                _ => {
                    unfilled += 1;
                    out.push_str(raw);
                }
            },
        }
    }

    trace!(unfilled, "filled template");
    out
}

/// Remove every placeholder, keeping the surrounding text
pub fn clear_placeholders(template: &str) -> String {
    scan(template)
        .pieces
        .into_iter()
        .filter(|p| !p.node.is_placeholder())
        .map(|p| &template[p.span])
        .collect()
}

/// Whether the template contains at least one placeholder
pub fn has_placeholders(template: &str) -> bool {
    scan(template).placeholders().next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::FieldValue;

    #[test]
    fn test_fill_all() {
        let values = ValueMap::new().with("name", "Ana").with("score", "95");
        assert_eq!(
            fill_placeholders("Hello [name], your score is [score].", &values),
            "Hello Ana, your score is 95."
        );
    }

    #[test]
    fn test_missing_and_empty_values_keep_token() {
        let values = ValueMap::new().with("b", "");
        assert_eq!(
            fill_placeholders("[a|text|required] and [b]", &values),
            "[a|text|required] and [b]"
        );
    }

    #[test]
    fn test_whitespace_value_is_substituted() {
        let values = ValueMap::new().with("a", " ");
        assert_eq!(fill_placeholders("<[a]>", &values), "< >");
    }

    #[test]
    fn test_extended_token_uses_name() {
        let values = ValueMap::new().with("tone", "casual");
        assert_eq!(
            fill_placeholders("Write in a [tone|select|required|formal|formal,casual] tone", &values),
            "Write in a casual tone"
        );
    }

    #[test]
    fn test_inserted_brackets_not_reparsed() {
        let values = ValueMap::new().with("a", "[b]").with("b", "nope");
        assert_eq!(fill_placeholders("[a]", &values), "[b]");
    }

    #[test]
    fn test_repeated_placeholder() {
        let values = ValueMap::new().with("x", "1");
        assert_eq!(fill_placeholders("[x]+[x]", &values), "1+1");
    }

    #[test]
    fn test_multi_value_is_joined() {
        let mut values = ValueMap::new();
        values.set("langs", FieldValue::from(vec!["Rust", "Go"]));
        assert_eq!(fill_placeholders("Use [langs]", &values), "Use Rust, Go");
        values.set("langs", FieldValue::Multi(vec![]));
        assert_eq!(fill_placeholders("Use [langs]", &values), "Use [langs]");
    }

    #[test]
    fn test_unmatched_brackets_copied() {
        let values = ValueMap::new().with("b", "B");
        assert_eq!(fill_placeholders("a] [x [b] [c", &values), "a] [x B [c");
    }

    #[test]
    fn test_clear_and_detect() {
        assert_eq!(clear_placeholders("Hi [name|text], bye [x]!"), "Hi , bye !");
        assert!(has_placeholders("Hi [name]"));
        assert!(!has_placeholders("Hi name]"));
        assert!(!has_placeholders(""));
    }
}
