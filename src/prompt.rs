//! Prompt records: a template with its fields and resolution settings
//!
//! A prompt file is TOML:
//!
//! ```toml
//! id = "weekly-report"
//! name = { en = "Weekly report", zh-CN = "周报" }
//! template = "Summarize [topic] for [audience|select|required]"
//!
//! [[fields]]
//! name = "audience"
//! type = "select"
//! preset = "jobTitle"
//! ```
//!
//! `fields = ["topic", "audience"]` is also accepted for older records.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::PromptError;
use crate::field::{Field, FieldList};
use crate::fill::fill_placeholders;
use crate::form::FormLayout;
use crate::highlight::{highlight_placeholders, Segment};
use crate::i18n::{Language, LocalizedText};
use crate::lint::{self, LintWarning};
use crate::options::{field_options, ResolvedOption};
use crate::presets::PresetRegistry;
use crate::resolve::{extract_placeholders, resolve_fields};
use crate::validate::{validate_fields, ValidationResult};
use crate::values::ValueMap;

/// TOML structure for deserializing prompt files
#[derive(Deserialize)]
struct PromptFile {
    id: Option<String>,
    name: Option<LocalizedText>,
    description: Option<LocalizedText>,
    template: LocalizedText,
    #[serde(default)]
    fields: FieldList,
}

/// A template bundled with its field definitions, language and presets
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub id: Option<String>,
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    content: LocalizedText,
    fields: Vec<Field>,
    language: Language,
    presets: PresetRegistry,
}

impl PromptTemplate {
    /// Create a prompt from template text and field definitions
    pub fn new(template: impl Into<LocalizedText>, fields: Vec<Field>) -> Self {
        Self {
            id: None,
            name: None,
            description: None,
            content: template.into(),
            fields,
            language: Language::default(),
            presets: PresetRegistry::default(),
        }
    }

    /// Load a prompt from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PromptError> {
        let content = std::fs::read_to_string(path).map_err(|e| PromptError::io(path, e))?;
        let prompt = Self::from_str(&content)?;
        debug!(path = %path.display(), fields = prompt.fields.len(), "loaded prompt file");
        Ok(prompt)
    }

    /// Load a prompt from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PromptError> {
        let parsed: PromptFile = toml::from_str(content)?;
        let mut prompt = Self::new(parsed.template, parsed.fields.into_fields());
        prompt.id = parsed.id;
        prompt.name = parsed.name;
        prompt.description = parsed.description;
        Ok(prompt)
    }

    /// Set the language used for template text, labels and options
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the preset tables used to resolve field options
    pub fn with_presets(mut self, presets: PresetRegistry) -> Self {
        self.presets = presets;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// Template text in the configured language
    pub fn template(&self) -> &str {
        self.content.localize(self.language)
    }

    /// Field definitions as given
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field definitions merged with placeholder metadata
    pub fn resolved_fields(&self) -> Vec<Field> {
        resolve_fields(self.template(), &self.fields)
    }

    pub fn placeholders(&self) -> Vec<String> {
        extract_placeholders(self.template())
    }

    pub fn fill(&self, values: &ValueMap) -> String {
        fill_placeholders(self.template(), values)
    }

    pub fn validate(&self, values: &ValueMap) -> ValidationResult {
        validate_fields(&self.resolved_fields(), values)
    }

    /// Segments for display; `required` is only known for defined fields
    pub fn highlight(&self) -> Vec<Segment> {
        highlight_placeholders(self.template(), &self.fields)
    }

    /// Options for a field by name; empty if the field has none or does not exist
    pub fn options(&self, name: &str) -> Vec<ResolvedOption> {
        self.resolved_fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| field_options(f, self.language, &self.presets))
            .unwrap_or_default()
    }

    pub fn form(&self) -> FormLayout {
        FormLayout::build(&self.resolved_fields())
    }

    /// Initial form values from field defaults
    pub fn initial_values(&self) -> ValueMap {
        self.form().initial_values(self.language, &self.presets)
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        lint::check(self.template(), &self.fields, &self.presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    const PROMPT: &str = r#"
id = "greeting"
name = { en = "Greeting", zh-CN = "问候" }
template = { en = "Hello [name], pick a [tone]", zh-CN = "你好 [name]，选择 [tone]" }

[[fields]]
name = "name"
required = true

[[fields]]
name = "tone"
type = "select"
options = ["formal", "casual"]
"#;

    #[test]
    fn test_load_prompt_file() {
        let prompt = PromptTemplate::from_str(PROMPT).expect("Should parse");
        assert_eq!(prompt.id.as_deref(), Some("greeting"));
        assert_eq!(prompt.fields().len(), 2);
        assert_eq!(prompt.template(), "Hello [name], pick a [tone]");
        assert_eq!(prompt.placeholders(), vec!["name", "tone"]);
    }

    #[test]
    fn test_language_switches_template() {
        let prompt = PromptTemplate::from_str(PROMPT)
            .expect("Should parse")
            .with_language(Language::ZhCn);
        assert_eq!(prompt.template(), "你好 [name]，选择 [tone]");
        assert_eq!(
            prompt.fill(&ValueMap::new().with("name", "Ana")),
            "你好 Ana，选择 [tone]"
        );
    }

    #[test]
    fn test_validate_and_initial_values() {
        let prompt = PromptTemplate::from_str(PROMPT).expect("Should parse");
        let values = prompt.initial_values();
        assert_eq!(values.text("tone").as_deref(), Some("formal"));
        let result = prompt.validate(&values);
        assert_eq!(result.missing_fields, vec!["name"]);
    }

    #[test]
    fn test_highlight_leaves_undefined_tokens_unknown() {
        let flags: Vec<_> = PromptTemplate::new("Hi [x] and [y|text|required]", vec![])
            .highlight()
            .into_iter()
            .filter(|s| s.is_placeholder())
            .map(|s| s.required)
            .collect();
        assert_eq!(flags, vec![None, None]);

        let prompt = PromptTemplate::from_str(PROMPT).expect("Should parse");
        let flags: Vec<_> = prompt
            .highlight()
            .into_iter()
            .filter(|s| s.is_placeholder())
            .map(|s| s.required)
            .collect();
        assert_eq!(flags, vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_legacy_field_names() {
        let prompt = PromptTemplate::from_str(
            r#"
template = "Write about [topic] for [company]"
fields = ["topic", "company"]
"#,
        )
        .expect("Should parse");
        assert!(prompt.fields().iter().all(|f| f.required));
        assert!(!prompt.validate(&ValueMap::new().with("topic", "AI")).is_valid);
    }

    #[test]
    fn test_options_from_presets() {
        let prompt = PromptTemplate::new(
            "[lang]",
            vec![Field::new("lang", FieldType::Select).with_preset("programmingLanguage")],
        );
        assert_eq!(prompt.options("lang")[0].value, "Python");
        assert!(prompt.options("missing").is_empty());
        assert!(PromptTemplate::new("[lang]", vec![])
            .with_presets(PresetRegistry::empty())
            .options("lang")
            .is_empty());
    }

    #[test]
    fn test_missing_template_is_an_error() {
        assert!(matches!(
            PromptTemplate::from_str("id = \"x\""),
            Err(PromptError::Toml(_))
        ));
    }
}
