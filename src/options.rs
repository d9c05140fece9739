//! Option lists and defaults for fields

use serde::Serialize;
use thiserror::Error;

use crate::field::{DefaultValue, Field, FieldOptions, FieldType};
use crate::i18n::{Language, LocalizedText};
use crate::presets::PresetRegistry;
use crate::values::FieldValue;

/// A choice as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOption {
    pub value: String,
    pub label: String,
}

/// A choice value outside the field's option list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("Invalid value. Must be one of: {}", .allowed.join(", "))]
    InvalidValue { allowed: Vec<String> },
    #[error("Invalid values: {}", .invalid.join(", "))]
    InvalidValues { invalid: Vec<String> },
}

/// Resolve a field's options for one language
///
/// Inline options win. A preset key that is not in the registry gives an
/// empty list.
pub fn field_options(field: &Field, language: Language, presets: &PresetRegistry) -> Vec<ResolvedOption> {
    match &field.options {
        FieldOptions::Inline(options) => options.iter().map(|o| inline_option(o, language)).collect(),
        FieldOptions::Preset(key) => resolve_preset_options(key, language, presets),
        FieldOptions::None => Vec::new(),
    }
}

/// Resolve a preset table to `{value, label}` pairs
pub fn resolve_preset_options(key: &str, language: Language, presets: &PresetRegistry) -> Vec<ResolvedOption> {
    presets
        .get(key)
        .unwrap_or_default()
        .iter()
        .map(|o| ResolvedOption {
            value: o.value.clone(),
            label: o.label.localize(language).to_string(),
        })
        .collect()
}

// Localized inline options use their English text as the stored value
fn inline_option(option: &LocalizedText, language: Language) -> ResolvedOption {
    match option {
        LocalizedText::Plain(text) => ResolvedOption {
            value: text.clone(),
            label: text.clone(),
        },
        LocalizedText::Translated(_) => ResolvedOption {
            value: option.localize(Language::En).to_string(),
            label: option.localize(language).to_string(),
        },
    }
}

/// Whether the field declares any options, inline or by preset
pub fn field_has_options(field: &Field) -> bool {
    match &field.options {
        FieldOptions::Inline(options) => !options.is_empty(),
        FieldOptions::Preset(_) => true,
        FieldOptions::None => false,
    }
}

/// Initial value for a field
///
/// An explicit default wins. A `select` with options starts on its first
/// option; multi-value types start empty.
pub fn field_default_value(field: &Field, language: Language, presets: &PresetRegistry) -> FieldValue {
    match &field.default_value {
        Some(DefaultValue::Single(value)) if !value.is_empty() => {
            return if field.field_type.is_multi() {
                FieldValue::Multi(vec![value.clone()])
            } else {
                FieldValue::Single(value.clone())
            };
        }
        Some(DefaultValue::Multi(values)) if !values.is_empty() => {
            return if field.field_type.is_multi() {
                FieldValue::Multi(values.clone())
            } else {
                FieldValue::Single(values.join(crate::values::LIST_SEPARATOR))
            };
        }
        _ => {}
    }

    if field.field_type.is_multi() {
        return FieldValue::Multi(Vec::new());
    }
    if field.field_type == FieldType::Select {
        if let Some(first) = field_options(field, language, presets).into_iter().next() {
            return FieldValue::Single(first.value);
        }
    }
    FieldValue::Single(String::new())
}

/// Check a single choice against the field's options
pub fn validate_select_value(
    field: &Field,
    value: &str,
    language: Language,
    presets: &PresetRegistry,
) -> Result<(), ChoiceError> {
    if !field.required && value.is_empty() {
        return Ok(());
    }

    let allowed: Vec<String> = field_options(field, language, presets)
        .into_iter()
        .map(|o| o.value)
        .collect();
    if allowed.iter().any(|v| v == value) {
        Ok(())
    } else {
        Err(ChoiceError::InvalidValue { allowed })
    }
}

/// Check a list of choices against the field's options
pub fn validate_multiselect_values(
    field: &Field,
    values: &[String],
    language: Language,
    presets: &PresetRegistry,
) -> Result<(), ChoiceError> {
    if !field.required && values.is_empty() {
        return Ok(());
    }

    let options = field_options(field, language, presets);
    let invalid: Vec<String> = values
        .iter()
        .filter(|v| !options.iter().any(|o| &o.value == *v))
        .cloned()
        .collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ChoiceError::InvalidValues { invalid })
    }
}
