//! Structural checks for templates and their field definitions.
//!
//! Nothing here stops a template from being used: every finding is a
//! warning about something that will degrade quietly at fill or validation
//! time, such as an empty placeholder name or a bracket that never closes.

use std::collections::HashSet;
use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::field::{find_field, Field, FieldOptions, FieldType};
use crate::parser::{parse_placeholder, scan, Span};
use crate::presets::PresetRegistry;

/// A lint warning about a template
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    /// Byte span in the template, when the finding has a location
    pub span: Option<Span>,
}

/// Category of lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    EmptyName,
    UnclosedBracket,
    StrayBracket,
    UndefinedField,
    UnusedField,
    MetadataConflict,
    UnknownType,
    UnknownPreset,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::EmptyName => write!(f, "empty-name"),
            LintCategory::UnclosedBracket => write!(f, "unclosed-bracket"),
            LintCategory::StrayBracket => write!(f, "stray-bracket"),
            LintCategory::UndefinedField => write!(f, "undefined-field"),
            LintCategory::UnusedField => write!(f, "unused-field"),
            LintCategory::MetadataConflict => write!(f, "metadata-conflict"),
            LintCategory::UnknownType => write!(f, "unknown-type"),
            LintCategory::UnknownPreset => write!(f, "unknown-preset"),
        }
    }
}

impl LintWarning {
    fn new(category: LintCategory, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            category,
            message: message.into(),
            span,
        }
    }

    /// Format the warning with template context using ariadne
    pub fn report(&self, source: &str, filename: &str) -> String {
        // ariadne counts characters, our spans count bytes
        let span = self
            .span
            .clone()
            .map(|s| char_offset(source, s.start)..char_offset(source, s.end))
            .unwrap_or(0..0);

        let mut report = Report::build(ReportKind::Warning, filename, span.start)
            .with_message(format!("[{}] {}", self.category, self.message));
        if self.span.is_some() {
            report = report.with_label(
                Label::new((filename, span))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            );
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return format!("warning[{}]: {}", self.category, self.message);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{} at {:?}: {}", self.category, span, self.message),
            None => write!(f, "{}: {}", self.category, self.message),
        }
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte)
        .count()
}

/// Run all lint checks on a template and its field definitions.
///
/// Field cross-checks only run when `fields` is non-empty.
pub fn check(template: &str, fields: &[Field], presets: &PresetRegistry) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_brackets(template, &mut warnings);
    check_tokens(template, fields, &mut warnings);
    check_presets(fields, presets, &mut warnings);
    warnings.sort_by_key(|w| w.span.as_ref().map_or(usize::MAX, |s| s.start));
    warnings
}

fn check_brackets(template: &str, warnings: &mut Vec<LintWarning>) {
    let scanned = scan(template);
    for &offset in &scanned.unclosed {
        warnings.push(LintWarning::new(
            LintCategory::UnclosedBracket,
            "'[' is never closed and will be kept as text",
            Some(offset..offset + 1),
        ));
    }
    for &offset in &scanned.stray {
        warnings.push(LintWarning::new(
            LintCategory::StrayBracket,
            "']' has no matching '['",
            Some(offset..offset + 1),
        ));
    }
}

fn check_tokens(template: &str, fields: &[Field], warnings: &mut Vec<LintWarning>) {
    let scanned = scan(template);
    let mut seen = HashSet::new();

    for (token, span) in scanned.placeholders() {
        let parsed = parse_placeholder(&template[token.inner.clone()]);
        let span = Some(span.clone());

        if parsed.name.is_empty() {
            warnings.push(LintWarning::new(
                LintCategory::EmptyName,
                "placeholder has an empty name",
                span.clone(),
            ));
        }

        if let Some(raw) = parsed.field_type.as_deref() {
            if FieldType::parse(raw).is_none() {
                warnings.push(LintWarning::new(
                    LintCategory::UnknownType,
                    format!("unknown field type '{}', treated as text", raw),
                    span.clone(),
                ));
            }
        }

        let first_use = seen.insert(parsed.name.clone());
        if fields.is_empty() || !first_use {
            continue;
        }

        match find_field(fields, &parsed.name) {
            None => warnings.push(LintWarning::new(
                LintCategory::UndefinedField,
                format!("no field definition for '{}'", parsed.name),
                span,
            )),
            Some(defined) => {
                if let Some(embedded) = parsed.known_type() {
                    if defined.field_type != FieldType::Text && embedded != defined.field_type {
                        warnings.push(LintWarning::new(
                            LintCategory::MetadataConflict,
                            format!(
                                "placeholder says '{}' but field '{}' is '{}'; the field definition is used",
                                embedded, defined.name, defined.field_type
                            ),
                            span.clone(),
                        ));
                    }
                }
                if parsed.required == Some(false) && defined.required {
                    warnings.push(LintWarning::new(
                        LintCategory::MetadataConflict,
                        format!(
                            "placeholder marks '{}' optional but the field is required",
                            defined.name
                        ),
                        span,
                    ));
                }
            }
        }
    }

    for field in fields {
        if !seen.contains(&field.name) {
            warnings.push(LintWarning::new(
                LintCategory::UnusedField,
                format!("field '{}' is not used by the template", field.name),
                None,
            ));
        }
    }
}

fn check_presets(fields: &[Field], presets: &PresetRegistry, warnings: &mut Vec<LintWarning>) {
    for field in fields {
        if let FieldOptions::Preset(key) = &field.options {
            if !presets.contains(key) {
                warnings.push(LintWarning::new(
                    LintCategory::UnknownPreset,
                    format!("field '{}' uses unknown preset '{}'", field.name, key),
                    None,
                ));
            }
        }
    }
}
