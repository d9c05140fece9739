//! Shared option tables for select-style fields
//!
//! A field can name a preset instead of listing its options inline. The
//! registry is passed to the functions that resolve options, so callers and
//! tests decide which tables are visible.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::i18n::LocalizedText;

/// Errors that can occur when loading preset tables
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse preset TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// One entry of a preset table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetOption {
    pub value: String,
    pub label: LocalizedText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl PresetOption {
    pub fn new(value: impl Into<String>, label: impl Into<LocalizedText>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            keywords: Vec::new(),
        }
    }
}

/// Named option tables
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRegistry {
    tables: HashMap<String, Vec<PresetOption>>,
}

/// TOML structure for deserializing preset files
#[derive(Deserialize)]
struct TomlPresets {
    #[serde(default)]
    presets: HashMap<String, Vec<PresetOption>>,
}

const DEFAULT_PRESETS: &str = include_str!("default_presets.toml");

impl PresetRegistry {
    /// A registry with no tables
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Load preset tables from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PresetError> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_str(&content)?;
        debug!(path = %path.display(), tables = registry.len(), "loaded preset file");
        Ok(registry)
    }

    /// Load preset tables from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PresetError> {
        let parsed: TomlPresets = toml::from_str(content)?;
        Ok(Self {
            tables: parsed.presets,
        })
    }

    /// Add or replace one table
    pub fn with_table(mut self, key: impl Into<String>, options: Vec<PresetOption>) -> Self {
        self.tables.insert(key.into(), options);
        self
    }

    /// Overlay another registry; its tables replace same-named ones here
    pub fn merge(mut self, other: PresetRegistry) -> Self {
        self.tables.extend(other.tables);
        self
    }

    /// Look up a table by key
    pub fn get(&self, key: &str) -> Option<&[PresetOption]> {
        self.tables.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    /// All table keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::from_str(DEFAULT_PRESETS).expect("Default presets should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_default_tables() {
        let presets = PresetRegistry::default();
        for key in [
            "jobTitle",
            "language",
            "country",
            "emailType",
            "emailTone",
            "dataSource",
            "analysisGoal",
            "programmingLanguage",
            "techDomain",
            "contentType",
            "writingStyle",
            "learningTopic",
            "learningGoal",
        ] {
            assert!(presets.contains(key), "missing preset {}", key);
        }
        assert_eq!(presets.len(), 13);
        assert_eq!(presets.get("jobTitle").map(<[_]>::len), Some(34));
    }

    #[test]
    fn test_default_labels_are_localized() {
        let presets = PresetRegistry::default();
        let languages = presets.get("programmingLanguage").expect("Should exist");
        assert_eq!(languages[0].value, "Python");
        let tones = presets.get("emailTone").expect("Should exist");
        assert_eq!(tones[0].label.localize(Language::En), "Formal & Professional");
        assert_eq!(tones[0].label.localize(Language::ZhCn), "正式专业");
    }

    #[test]
    fn test_parse_custom_presets() {
        let presets = PresetRegistry::from_str(
            r#"
[presets]
size = [
    { value = "s", label = "Small" },
    { value = "l", label = { en = "Large" }, keywords = ["big"] },
]
"#,
        )
        .expect("Should parse");
        let size = presets.get("size").expect("Should exist");
        assert_eq!(size.len(), 2);
        assert_eq!(size[1].keywords, vec!["big"]);
        assert!(presets.get("jobTitle").is_none());
    }

    #[test]
    fn test_merge_and_fixture_tables() {
        let presets = PresetRegistry::empty()
            .with_table("a", vec![PresetOption::new("1", "One")])
            .merge(PresetRegistry::empty().with_table("a", vec![]));
        assert_eq!(presets.get("a").map(<[_]>::len), Some(0));
        assert_eq!(presets.keys(), vec!["a"]);
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = PresetRegistry::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(PresetError::ParseError(_))));
    }
}
