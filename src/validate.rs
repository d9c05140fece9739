//! Field validation against entered values
//!
//! Validation never fails as an operation: problems are reported per field
//! in a [`ValidationResult`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::debug;
use url::{Host, Url};

use crate::field::{Field, FieldType};
use crate::resolve::resolve_fields;
use crate::values::{FieldValue, ValueMap};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Problem with a single field's value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Please enter a valid number")]
    InvalidNumber,
    #[error("Minimum value is {0}")]
    BelowMin(f64),
    #[error("Maximum value is {0}")]
    AboveMax(f64),
    #[error("At least {0} characters required")]
    TooShort(f64),
    #[error("At most {0} characters allowed")]
    TooLong(f64),
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of validating a value map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Required fields with blank values, in field order
    pub missing_fields: Vec<String>,
    /// At most one error per field name
    pub errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    /// The display message for a field, if it has an error
    pub fn message(&self, name: &str) -> Option<String> {
        self.errors.get(name).map(ToString::to_string)
    }
}

/// Validate values against the template's fields
///
/// Checks run over the resolved field list: definitions first, with
/// metadata embedded in placeholders such as `[email|email|required]`
/// filling the gaps.
pub fn validate_placeholders(template: &str, fields: &[Field], values: &ValueMap) -> ValidationResult {
    validate_fields(&resolve_fields(template, fields), values)
}

/// Validate values against an already resolved field list
pub fn validate_fields(fields: &[Field], values: &ValueMap) -> ValidationResult {
    let mut missing_fields = Vec::new();
    let mut errors = BTreeMap::new();

    for field in fields {
        let value = values.get(&field.name);
        let blank = value.is_none_or(FieldValue::is_blank);

        if field.required && blank {
            debug!(field = %field.name, "required field is blank");
            missing_fields.push(field.name.clone());
            errors.insert(field.name.clone(), FieldError::Required);
        }

        if blank {
            continue;
        }
        let Some(text) = values.text(&field.name) else {
            continue;
        };
        if let Some(error) = check_value(field, &text) {
            debug!(field = %field.name, %error, "field value rejected");
            errors.insert(field.name.clone(), error);
        }
    }

    ValidationResult {
        is_valid: missing_fields.is_empty() && errors.is_empty(),
        missing_fields,
        errors,
    }
}

/// Type-specific check for a non-blank value; the last violated rule wins
pub fn check_value(field: &Field, value: &str) -> Option<FieldError> {
    match field.field_type {
        FieldType::Email => (!is_valid_email(value)).then_some(FieldError::InvalidEmail),
        FieldType::Url => (!is_valid_url(value)).then_some(FieldError::InvalidUrl),
        FieldType::Number => check_number(field, value),
        FieldType::Text => check_length(field, value),
        _ => None,
    }
}

fn check_number(field: &Field, value: &str) -> Option<FieldError> {
    let number = match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Some(FieldError::InvalidNumber),
    };

    let mut error = None;
    if let Some(min) = field.min.filter(|min| number < *min) {
        error = Some(FieldError::BelowMin(min));
    }
    if let Some(max) = field.max.filter(|max| number > *max) {
        error = Some(FieldError::AboveMax(max));
    }
    error
}

/// `min`/`max` on a text field bound its length in characters
fn check_length(field: &Field, value: &str) -> Option<FieldError> {
    let length = value.chars().count() as f64;

    let mut error = None;
    if let Some(min) = field.min.filter(|min| length < *min) {
        error = Some(FieldError::TooShort(min));
    }
    if let Some(max) = field.max.filter(|max| length > *max) {
        error = Some(FieldError::TooLong(max));
    }
    error
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Accepts bare domains by assuming `https://`; the host must be an IP or contain a dot
pub fn is_valid_url(value: &str) -> bool {
    let candidate = if value.contains("://") {
        value.to_string()
    } else {
        format!("https://{}", value)
    };

    match Url::parse(&candidate) {
        Ok(url) => match url.host() {
            Some(Host::Domain(domain)) => domain.contains('.'),
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
            None => false,
        },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number_field() -> Field {
        Field::new("score", FieldType::Number)
            .with_required(true)
            .with_min(0.0)
            .with_max(100.0)
    }

    #[test]
    fn test_required_missing_and_blank() {
        let fields = vec![Field::text("a").with_required(true), Field::text("b").with_required(true)];
        let values = ValueMap::new().with("b", "   ");
        let result = validate_placeholders("", &fields, &values);
        assert!(!result.is_valid);
        assert_eq!(result.missing_fields, vec!["a", "b"]);
        assert_eq!(result.message("a").as_deref(), Some("This field is required"));
    }

    #[test]
    fn test_optional_blank_is_fine() {
        let fields = vec![Field::new("mail", FieldType::Email)];
        let result = validate_placeholders("", &fields, &ValueMap::new());
        assert!(result.is_valid);
    }

    #[test]
    fn test_optional_fields_are_still_type_checked() {
        let fields = vec![Field::new("mail", FieldType::Email)];
        let values = ValueMap::new().with("mail", "nope");
        let result = validate_placeholders("", &fields, &values);
        assert!(!result.is_valid);
        assert!(result.missing_fields.is_empty());
        assert_eq!(result.errors.get("mail"), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn test_url_shapes() {
        assert!(is_valid_url("example.com"));
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("http://192.168.0.1:8080"));
        assert!(!is_valid_url("localhost"));
        assert!(!is_valid_url("exa mple.com"));
        assert!(!is_valid_url("not a url"));
        assert!(is_valid_url("ftp://example.com"));
        assert!(is_valid_url("httpbin.org"));
        assert!(!is_valid_url("ftp://localhost"));

        let fields = vec![Field::new("u", FieldType::Url)];
        let values = ValueMap::new().with("u", "ftp://example.com");
        assert!(validate_fields(&fields, &values).is_valid);
    }

    #[test]
    fn test_number_range() {
        let field = number_field();
        assert_eq!(check_value(&field, "150"), Some(FieldError::AboveMax(100.0)));
        assert_eq!(check_value(&field, "-1"), Some(FieldError::BelowMin(0.0)));
        assert_eq!(check_value(&field, "0"), None);
        assert_eq!(check_value(&field, "100"), None);
        assert_eq!(check_value(&field, " 42.5 "), None);
        assert_eq!(check_value(&field, "abc"), Some(FieldError::InvalidNumber));
        assert_eq!(check_value(&field, "inf"), Some(FieldError::InvalidNumber));
        assert_eq!(check_value(&field, "0x10"), Some(FieldError::InvalidNumber));
    }

    #[test]
    fn test_last_check_wins_on_inverted_bounds() {
        let field = Field::new("n", FieldType::Number).with_min(10.0).with_max(5.0);
        assert_eq!(check_value(&field, "7"), Some(FieldError::AboveMax(5.0)));
    }

    #[test]
    fn test_text_length_bounds() {
        let field = Field::text("title").with_min(3.0).with_max(5.0);
        assert_eq!(check_value(&field, "ab"), Some(FieldError::TooShort(3.0)));
        assert_eq!(check_value(&field, "abcdef"), Some(FieldError::TooLong(5.0)));
        assert_eq!(check_value(&field, "abc"), None);
        assert_eq!(check_value(&field, "标题很长"), None);
        // Length, not numeric value
        assert_eq!(check_value(&field, "999"), None);
    }

    #[test]
    fn test_textarea_has_no_length_check() {
        let field = Field::new("body", FieldType::Textarea).with_max(2.0);
        assert_eq!(check_value(&field, "long text"), None);
    }

    #[test]
    fn test_embedded_metadata_is_validated() {
        let values = ValueMap::new().with("email", "not-an-email");
        let result = validate_placeholders("Contact [email|email|required]", &[], &values);
        assert_eq!(result.errors.get("email"), Some(&FieldError::InvalidEmail));

        let result = validate_placeholders("Contact [email|email|required]", &[], &ValueMap::new());
        assert_eq!(result.missing_fields, vec!["email"]);
    }

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::AboveMax(100.0).to_string(), "Maximum value is 100");
        assert_eq!(FieldError::BelowMin(0.5).to_string(), "Minimum value is 0.5");
        assert_eq!(FieldError::TooShort(3.0).to_string(), "At least 3 characters required");
        assert_eq!(FieldError::TooLong(10.0).to_string(), "At most 10 characters allowed");
    }

    #[test]
    fn test_result_serializes_messages() {
        let fields = vec![number_field()];
        let values = ValueMap::new().with("score", "150");
        let result = validate_placeholders("", &fields, &values);
        let json = serde_json::to_value(&result).expect("Should serialize");
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"]["score"], "Maximum value is 100");
    }
}
