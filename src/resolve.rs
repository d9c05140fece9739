//! Merging template-embedded metadata with field definitions
//!
//! A token like `[tone|select|required|formal|formal,casual]` repeats what a
//! field definition may also say. The field definition wins; embedded values
//! only fill in what the definition leaves at its default.

use tracing::{debug, trace};

use crate::field::{find_field, DefaultValue, Field, FieldOptions, FieldType};
use crate::parser::{parse_placeholder, scan, ParsedPlaceholder};

/// Names of all placeholders in order of appearance, duplicates included
pub fn extract_placeholders(template: &str) -> Vec<String> {
    scan(template)
        .placeholders()
        .map(|(token, _)| token.name.clone())
        .collect()
}

/// Parsed metadata for every placeholder in order of appearance
pub fn extract_placeholders_with_meta(template: &str) -> Vec<ParsedPlaceholder> {
    let scanned = scan(template);
    scanned
        .placeholders()
        .map(|(token, _)| parse_placeholder(&template[token.inner.clone()]))
        .collect()
}

/// Build a field straight from a placeholder token
pub fn field_from_placeholder(parsed: &ParsedPlaceholder) -> Field {
    let mut field = Field::new(parsed.name.clone(), parsed.known_type().unwrap_or_default())
        .with_required(parsed.required.unwrap_or(false));
    apply_embedded_values(&mut field, parsed);
    field
}

/// The effective field list for a template
///
/// One field per distinct placeholder name, in order of first appearance,
/// followed by defined fields the template never references.
pub fn resolve_fields(template: &str, fields: &[Field]) -> Vec<Field> {
    let mut resolved: Vec<Field> = Vec::new();

    for parsed in extract_placeholders_with_meta(template) {
        if resolved.iter().any(|f| f.name == parsed.name) {
            continue;
        }
        let field = match find_field(fields, &parsed.name) {
            Some(defined) => merge_embedded(defined, &parsed),
            None => {
                trace!(name = %parsed.name, "placeholder has no field definition");
                field_from_placeholder(&parsed)
            }
        };
        resolved.push(field);
    }

    for field in fields {
        if !resolved.iter().any(|f| f.name == field.name) {
            resolved.push(field.clone());
        }
    }

    debug!(count = resolved.len(), "resolved fields");
    resolved
}

/// Fill gaps in a defined field from embedded token metadata
pub fn merge_embedded(defined: &Field, parsed: &ParsedPlaceholder) -> Field {
    let mut field = defined.clone();
    if field.field_type == FieldType::Text {
        if let Some(embedded) = parsed.known_type() {
            field.field_type = embedded;
        }
    }
    if !field.required {
        field.required = parsed.required.unwrap_or(false);
    }
    apply_embedded_values(&mut field, parsed);
    field
}

fn apply_embedded_values(field: &mut Field, parsed: &ParsedPlaceholder) {
    if field.default_value.is_none() {
        field.default_value = parsed.default_value.clone().map(DefaultValue::Single);
    }
    if field.options.is_none() {
        if let Some(options) = &parsed.options {
            field.options = FieldOptions::Inline(options.iter().map(|o| o.as_str().into()).collect());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_names() {
        assert_eq!(
            extract_placeholders("Hello [name], your score is [score|number]. Bye [name]"),
            vec!["name", "score", "name"]
        );
        assert!(extract_placeholders("plain text").is_empty());
    }

    #[test]
    fn test_extract_with_meta() {
        let meta = extract_placeholders_with_meta("[a|email|required] [b]");
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].known_type(), Some(FieldType::Email));
        assert_eq!(meta[0].required, Some(true));
        assert_eq!(meta[1].field_type, None);
    }

    #[test]
    fn test_undefined_placeholder_becomes_field() {
        let fields = resolve_fields("[tone|select|required|formal|formal, casual]", &[]);
        assert_eq!(fields.len(), 1);
        let tone = &fields[0];
        assert_eq!(tone.field_type, FieldType::Select);
        assert!(tone.required);
        assert_eq!(tone.default_value, Some(DefaultValue::Single("formal".into())));
        assert!(matches!(&tone.options, FieldOptions::Inline(o) if o.len() == 2));
    }

    #[test]
    fn test_unknown_embedded_type_falls_back_to_text() {
        let fields = resolve_fields("[x|colour]", &[]);
        assert_eq!(fields[0].field_type, FieldType::Text);
        assert!(!fields[0].required);
    }

    #[test]
    fn test_definition_wins() {
        let defined = vec![Field::new("score", FieldType::Number).with_max(10.0)];
        let fields = resolve_fields("[score|email|required|5]", &defined);
        assert_eq!(fields[0].field_type, FieldType::Number);
        // Gaps are still filled from the token
        assert!(fields[0].required);
        assert_eq!(fields[0].default_value, Some(DefaultValue::Single("5".into())));
        assert_eq!(fields[0].max, Some(10.0));
    }

    #[test]
    fn test_text_definition_takes_embedded_type() {
        let defined = vec![Field::text("mail")];
        let fields = resolve_fields("[mail|email]", &defined);
        assert_eq!(fields[0].field_type, FieldType::Email);
    }

    #[test]
    fn test_order_dedup_and_unused_fields() {
        let defined = vec![Field::text("unused"), Field::text("b")];
        let fields = resolve_fields("[b] [a] [b]", &defined);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "unused"]);
    }
}
