//! Prompt Fill - placeholder templating for AI prompt catalogs
//!
//! Templates mark fill-in slots with brackets, optionally carrying metadata:
//! `[name]` or `[name|type|required|default|option1,option2]`. This library
//! extracts those placeholders, validates user values against typed field
//! definitions, fills templates and splits them into highlight segments.
//!
//! # Example
//!
//! ```rust
//! use prompt_fill::{fill_placeholders, validate_placeholders, Field, FieldType, ValueMap};
//!
//! let template = "Hello [name], your score is [score].";
//! let fields = vec![
//!     Field::text("name").with_required(true),
//!     Field::new("score", FieldType::Number).with_required(true).with_min(0.0).with_max(100.0),
//! ];
//! let values = ValueMap::new().with("name", "Ana").with("score", "95");
//!
//! assert!(validate_placeholders(template, &fields, &values).is_valid);
//! assert_eq!(fill_placeholders(template, &values), "Hello Ana, your score is 95.");
//! ```

pub mod error;
pub mod field;
pub mod fill;
pub mod form;
pub mod highlight;
pub mod i18n;
pub mod lint;
pub mod options;
pub mod parser;
pub mod presets;
pub mod prompt;
pub mod resolve;
pub mod validate;
pub mod values;

pub use error::PromptError;
pub use field::{fields_from_names, DefaultValue, Field, FieldList, FieldOptions, FieldType};
pub use fill::{clear_placeholders, fill_placeholders, has_placeholders};
pub use form::{FieldGroup, FormLayout};
pub use highlight::{highlight_placeholders, placeholder_display, Segment, SegmentKind};
pub use i18n::{Language, LocalizedText, Translations};
pub use lint::{LintCategory, LintWarning};
pub use options::{
    field_default_value, field_has_options, field_options, validate_multiselect_values,
    validate_select_value, ChoiceError, ResolvedOption,
};
pub use parser::{parse_placeholder, ParsedPlaceholder};
pub use presets::{PresetError, PresetOption, PresetRegistry};
pub use prompt::PromptTemplate;
pub use resolve::{extract_placeholders, extract_placeholders_with_meta, resolve_fields};
pub use validate::{validate_fields, validate_placeholders, FieldError, ValidationResult};
pub use values::{FieldValue, ValueMap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_then_validate_round() {
        let template = "Contact [email|email|required] about [topic]";
        let values = ValueMap::new().with("email", "a@b.com");
        assert!(validate_placeholders(template, &[], &values).is_valid);
        assert_eq!(
            fill_placeholders(template, &values),
            "Contact a@b.com about [topic]"
        );
    }

    #[test]
    fn test_template_without_placeholders() {
        let template = "Just text.";
        assert!(extract_placeholders(template).is_empty());
        assert!(!has_placeholders(template));
        assert_eq!(fill_placeholders(template, &ValueMap::new()), template);
        let segments = highlight_placeholders(template, &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Text);
    }
}
