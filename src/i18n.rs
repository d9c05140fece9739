//! Localized text and language fallback

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported content languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
}

/// Order tried after the requested language
pub const FALLBACK_ORDER: [Language; 5] = [
    Language::En,
    Language::ZhCn,
    Language::ZhTw,
    Language::Ja,
    Language::Ko,
];

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::ZhCn => "zh-CN",
            Language::ZhTw => "zh-TW",
            Language::Ja => "ja",
            Language::Ko => "ko",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FALLBACK_ORDER
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unsupported language '{}' (expected one of: en, zh-CN, zh-TW, ja, ko)",
                    s
                )
            })
    }
}

/// Per-language strings; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(rename = "zh-CN", default, skip_serializing_if = "Option::is_none")]
    pub zh_cn: Option<String>,
    #[serde(rename = "zh-TW", default, skip_serializing_if = "Option::is_none")]
    pub zh_tw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ko: Option<String>,
}

impl Translations {
    /// Text for one language, treating empty strings as missing
    pub fn get(&self, language: Language) -> Option<&str> {
        let text = match language {
            Language::En => &self.en,
            Language::ZhCn => &self.zh_cn,
            Language::ZhTw => &self.zh_tw,
            Language::Ja => &self.ja,
            Language::Ko => &self.ko,
        };
        text.as_deref().filter(|t| !t.is_empty())
    }
}

/// A display string: either one plain string or a set of translations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Translated(Translations),
}

impl LocalizedText {
    /// Resolve to one language
    ///
    /// Fallback order: requested language, then `FALLBACK_ORDER`, then "".
    /// Plain strings resolve to themselves.
    pub fn localize(&self, language: Language) -> &str {
        match self {
            LocalizedText::Plain(text) => text,
            LocalizedText::Translated(t) => t
                .get(language)
                .or_else(|| FALLBACK_ORDER.iter().find_map(|lang| t.get(*lang)))
                .unwrap_or_default(),
        }
    }

    /// Whether text exists for exactly this language
    pub fn has_language(&self, language: Language) -> bool {
        match self {
            LocalizedText::Plain(_) => false,
            LocalizedText::Translated(t) => t.get(language).is_some(),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::Plain(text.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::Plain(text)
    }
}

impl From<Translations> for LocalizedText {
    fn from(t: Translations) -> Self {
        LocalizedText::Translated(t)
    }
}
