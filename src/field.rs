//! Field definitions referenced by template placeholders
//!
//! Shape variations in field definitions (string or localized options,
//! scalar or list defaults, inline options or a preset key) are settled
//! once at deserialization time into the sum types below.

use serde::{Deserialize, Serialize};

use crate::i18n::LocalizedText;

/// Input control type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Multiselect,
    Combobox,
    MultiselectCombobox,
    Email,
    Url,
    Json,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Number,
        FieldType::Date,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Combobox,
        FieldType::MultiselectCombobox,
        FieldType::Email,
        FieldType::Url,
        FieldType::Json,
    ];

    /// Parse a type name as written in templates (case-sensitive)
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Combobox => "combobox",
            FieldType::MultiselectCombobox => "multiselect-combobox",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Json => "json",
        }
    }

    /// Types whose value is a list
    pub fn is_multi(self) -> bool {
        matches!(self, FieldType::Multiselect | FieldType::MultiselectCombobox)
    }

    /// Types that offer a list of choices
    pub fn has_choices(self) -> bool {
        matches!(
            self,
            FieldType::Select
                | FieldType::Multiselect
                | FieldType::Combobox
                | FieldType::MultiselectCombobox
        )
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field's choices come from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldOptions {
    #[default]
    None,
    /// Options listed on the field itself
    Inline(Vec<LocalizedText>),
    /// Key into a shared preset table
    Preset(String),
}

impl FieldOptions {
    pub fn is_none(&self) -> bool {
        matches!(self, FieldOptions::None)
    }
}

/// Default for a field: one string or a list for multi-value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Single(String),
    Multi(Vec<String>),
}

/// A named, typed slot referenced by a template placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct Field {
    pub name: String,
    pub label: Option<LocalizedText>,
    pub field_type: FieldType,
    pub required: bool,
    pub placeholder: Option<LocalizedText>,
    pub hint: Option<LocalizedText>,
    pub default_value: Option<DefaultValue>,
    pub options: FieldOptions,
    /// Numeric bounds for `number`, length bounds for `text`
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub rows: Option<u32>,
    pub group: Option<String>,
    pub group_name: Option<LocalizedText>,
    pub order: Option<i64>,
}

impl Field {
    /// Create an optional field with no metadata
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: None,
            field_type,
            required: false,
            placeholder: None,
            hint: None,
            default_value: None,
            options: FieldOptions::None,
            min: None,
            max: None,
            rows: None,
            group: None,
            group_name: None,
            order: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_label(mut self, label: impl Into<LocalizedText>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LocalizedText>,
    {
        self.options = FieldOptions::Inline(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_preset(mut self, key: impl Into<String>) -> Self {
        self.options = FieldOptions::Preset(key.into());
        self
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Serialized shape of a field, as found in prompt files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<LocalizedText>,
    #[serde(rename = "type", default)]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        // Inline options take precedence over a preset key
        let options = if !raw.options.is_empty() {
            FieldOptions::Inline(raw.options)
        } else if let Some(key) = raw.preset {
            FieldOptions::Preset(key)
        } else {
            FieldOptions::None
        };

        Field {
            name: raw.name,
            label: raw.label,
            field_type: raw.field_type,
            required: raw.required,
            placeholder: raw.placeholder,
            hint: raw.hint,
            default_value: raw.default_value,
            options,
            min: raw.min,
            max: raw.max,
            rows: raw.rows,
            group: raw.group,
            group_name: raw.group_name,
            order: raw.order,
        }
    }
}

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let (options, preset) = match field.options {
            FieldOptions::None => (Vec::new(), None),
            FieldOptions::Inline(options) => (options, None),
            FieldOptions::Preset(key) => (Vec::new(), Some(key)),
        };

        RawField {
            name: field.name,
            label: field.label,
            field_type: field.field_type,
            required: field.required,
            placeholder: field.placeholder,
            hint: field.hint,
            default_value: field.default_value,
            options,
            preset,
            min: field.min,
            max: field.max,
            rows: field.rows,
            group: field.group,
            group_name: field.group_name,
            order: field.order,
        }
    }
}

/// A field list as stored on a prompt record
///
/// Older records only list placeholder names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    Names(Vec<String>),
    Defined(Vec<Field>),
}

impl Default for FieldList {
    fn default() -> Self {
        FieldList::Defined(Vec::new())
    }
}

impl FieldList {
    pub fn into_fields(self) -> Vec<Field> {
        match self {
            FieldList::Names(names) => fields_from_names(&names),
            FieldList::Defined(fields) => fields,
        }
    }
}

/// Upgrade a legacy name list to required text fields in the default group
pub fn fields_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Field> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            Field::text(name.as_ref())
                .with_label(name.as_ref())
                .with_required(true)
                .with_order(index as i64)
                .with_group("default")
        })
        .collect()
}

/// Look up a field definition by name
pub fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.name == name)
}
