//! Form layout: ordered, grouped fields with initial values

use serde::Serialize;

use crate::field::Field;
use crate::i18n::Language;
use crate::options::{field_default_value, field_options, ResolvedOption};
use crate::presets::PresetRegistry;
use crate::values::ValueMap;

/// Group used for fields that do not name one
pub const DEFAULT_GROUP: &str = "default";

/// Fields of one group, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub key: String,
    pub fields: Vec<Field>,
}

impl FieldGroup {
    /// Group title: the first localized group name found on a member field, else the key
    pub fn title(&self, language: Language) -> String {
        self.fields
            .iter()
            .find_map(|f| f.group_name.as_ref())
            .map(|name| name.localize(language))
            .filter(|name| !name.is_empty())
            .unwrap_or(self.key.as_str())
            .to_string()
    }
}

/// Fields sorted by `order` and grouped by `group`
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    pub groups: Vec<FieldGroup>,
}

impl FormLayout {
    /// Sort fields (stable, missing order counts as 0) and group them
    ///
    /// Groups appear in the order their first sorted member appears.
    pub fn build(fields: &[Field]) -> Self {
        let mut sorted: Vec<&Field> = fields.iter().collect();
        sorted.sort_by_key(|f| f.order.unwrap_or(0));

        let mut groups: Vec<FieldGroup> = Vec::new();
        for field in sorted {
            let key = field.group.as_deref().unwrap_or(DEFAULT_GROUP);
            match groups.iter_mut().find(|g| g.key == key) {
                Some(group) => group.fields.push(field.clone()),
                None => groups.push(FieldGroup {
                    key: key.to_string(),
                    fields: vec![field.clone()],
                }),
            }
        }

        Self { groups }
    }

    /// All fields in display order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    /// Starting values for every field
    pub fn initial_values(&self, language: Language, presets: &PresetRegistry) -> ValueMap {
        self.fields()
            .map(|f| (f.name.clone(), field_default_value(f, language, presets)))
            .collect()
    }

    /// A localized, serializable description of the form
    pub fn describe(&self, language: Language, presets: &PresetRegistry) -> Vec<GroupView> {
        self.groups
            .iter()
            .map(|group| GroupView {
                key: group.key.clone(),
                title: group.title(language),
                fields: group
                    .fields
                    .iter()
                    .map(|f| FieldView {
                        name: f.name.clone(),
                        label: f
                            .label
                            .as_ref()
                            .map(|l| l.localize(language).to_string())
                            .unwrap_or_else(|| f.name.clone()),
                        field_type: f.field_type.as_str(),
                        required: f.required,
                        hint: f.hint.as_ref().map(|h| h.localize(language).to_string()),
                        options: field_options(f, language, presets),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub key: String,
    pub title: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ResolvedOption>,
}
