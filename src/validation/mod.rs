//! Schema validation for request and response payloads.
//!
//! Every request type implements [`Validate`], which walks its fields with a
//! [`Validator`] and collects field-level errors. Validation never mutates
//! its input: [`validate`] hands the input back unchanged on
//! success, or a [`ValidationErrors`] list describing every violation.
//!
//! # Rules
//!
//! - required strings must be non-empty
//! - dates must have the `YYYY-MM-DD` shape; the calendar is not checked,
//!   so `2023-02-31` and `2023-13-45` are accepted
//! - numeric floors are enforced (`quantity > 0`, `unit_amount >= 0`, ...)
//! - sequences are bounded (`line_items` non-empty, recipient buckets `<= 6`)
//! - emails must match `local@domain.tld`
//! - enumerated fields are closed sets, enforced by the typed enums in
//!   [`resources`](crate::resources) and by [`from_value`] for raw JSON
//!
//! # Example
//!
//! ```rust
//! use wafeq_api::validation::{Constraint, Validate, Validator};
//!
//! struct Note {
//!     title: String,
//! }
//!
//! impl Validate for Note {
//!     fn check(&self, v: &mut Validator) {
//!         v.required("title", &self.title);
//!     }
//! }
//!
//! let errors = Note { title: String::new() }.validate().unwrap_err();
//! assert_eq!(errors.iter().next().unwrap().constraint, Constraint::Required);
//! ```

mod format;

pub use format::{format_date, is_valid_date_format, is_valid_email};

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The kind of rule a field violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// A required value was missing or empty.
    Required,
    /// A value had the wrong type (including non-finite numbers).
    Type,
    /// A string did not match the expected shape (date, email).
    Format,
    /// A number fell outside its allowed range.
    Range,
    /// A sequence had too few or too many entries.
    Length,
    /// A value was not one of a closed set of literals.
    Enum,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Required => "required",
            Self::Type => "type",
            Self::Format => "format",
            Self::Range => "range",
            Self::Length => "length",
            Self::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the offending field, e.g. `line_items[0].quantity`.
    pub path: String,
    /// The rule that was violated.
    pub constraint: Constraint,
    /// Human-readable description of the failure.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A non-empty list of field-level validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Builds a list holding a single error.
    #[must_use]
    pub fn single(
        path: impl Into<String>,
        constraint: Constraint,
        message: impl Into<String>,
    ) -> Self {
        Self(vec![FieldError {
            path: path.into(),
            constraint,
            message: message.into(),
        }])
    }

    /// Iterates over the collected errors in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Returns the number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a `ValidationErrors` value is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first error reported for `path`, if any.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.path == path)
    }

    /// Consumes the list and returns the underlying errors.
    #[must_use]
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A payload with a declarative schema.
///
/// Implementors describe their rules in [`check`](Self::check); callers use
/// [`validate`](Self::validate).
pub trait Validate {
    /// Records every rule violation of `self` into `v`.
    fn check(&self, v: &mut Validator);

    /// Validates `self`, returning all violations at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if any rule is violated.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        self.check(&mut v);
        v.finish()
    }
}

/// Validates `value` and hands it back unchanged.
///
/// # Errors
///
/// Returns [`ValidationErrors`] if any rule is violated.
pub fn validate<T: Validate>(value: T) -> Result<T, ValidationErrors> {
    value.validate()?;
    Ok(value)
}

/// Decodes a raw JSON payload into `T` and validates it.
///
/// Decoding failures (missing fields, wrong types, unknown enum literals)
/// are reported as a single field-level error. Only a missing field gets a
/// path, and it is the bare field name as serde reports it, not qualified
/// by its parent (`account`, not `line_items[0].account`). Other decoding
/// failures have an empty path and carry serde's message.
///
/// # Errors
///
/// Returns [`ValidationErrors`] if decoding fails or any rule is violated.
pub fn from_value<T>(value: serde_json::Value) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T = serde_json::from_value(value).map_err(|e| decode_error(&e))?;
    validate(decoded)
}

/// Maps a serde decoding failure onto a field-level error.
///
/// The path is serde's leaf field name, never a fully qualified path.
pub(crate) fn decode_error(error: &serde_json::Error) -> ValidationErrors {
    let message = error.to_string();

    if let Some(field) = backticked_after(&message, "missing field ") {
        return ValidationErrors::single(field, Constraint::Required, message);
    }
    let constraint = if message.starts_with("unknown ") {
        Constraint::Enum
    } else {
        Constraint::Type
    };
    ValidationErrors::single("", constraint, message)
}

fn backticked_after(message: &str, marker: &str) -> Option<String> {
    let rest = message.strip_prefix(marker)?.strip_prefix('`')?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

/// Collects field-level errors while walking a payload.
///
/// Field names passed to the checks are relative to the current nesting
/// level; [`nested`](Self::nested) and [`each`](Self::each) extend the path.
#[derive(Debug, Default)]
pub struct Validator {
    prefix: Vec<String>,
    errors: Vec<FieldError>,
}

impl Validator {
    /// Creates an empty validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn path(&self, field: &str) -> String {
        let mut path = String::new();
        for segment in &self.prefix {
            if !path.is_empty() && !segment.starts_with('[') {
                path.push('.');
            }
            path.push_str(segment);
        }
        if !field.is_empty() {
            if !path.is_empty() && !field.starts_with('[') {
                path.push('.');
            }
            path.push_str(field);
        }
        path
    }

    /// Records a violation for `field`.
    pub fn push(&mut self, field: &str, constraint: Constraint, message: impl Into<String>) {
        let path = self.path(field);
        self.errors.push(FieldError {
            path,
            constraint,
            message: message.into(),
        });
    }

    /// Requires `value` to be non-empty. Whitespace counts as content.
    pub fn required(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.push(field, Constraint::Required, format!("{field} is required"));
        }
    }

    /// Requires `value` to have the `YYYY-MM-DD` shape.
    pub fn date(&mut self, field: &str, value: &str) {
        if !is_valid_date_format(value) {
            self.push(
                field,
                Constraint::Format,
                "Date must be in YYYY-MM-DD format",
            );
        }
    }

    /// Requires `value`, when present, to have the `YYYY-MM-DD` shape.
    pub fn optional_date(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.date(field, value);
        }
    }

    /// Requires `value` to be a well-formed email address.
    pub fn email(&mut self, field: &str, value: &str) {
        if !is_valid_email(value) {
            self.push(field, Constraint::Format, "Invalid email format");
        }
    }

    /// Requires `value`, when present, to be a well-formed email address.
    pub fn optional_email(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.email(field, value);
        }
    }

    /// Requires `value` to be a finite number.
    pub fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.push(field, Constraint::Type, format!("{field} must be a finite number"));
            false
        }
    }

    /// Requires `value > 0`.
    pub fn positive(&mut self, field: &str, value: f64) {
        if self.finite(field, value) && value <= 0.0 {
            self.push(field, Constraint::Range, format!("{field} must be positive"));
        }
    }

    /// Requires `value >= 0`.
    pub fn non_negative(&mut self, field: &str, value: f64) {
        if self.finite(field, value) && value < 0.0 {
            self.push(
                field,
                Constraint::Range,
                format!("{field} must be non-negative"),
            );
        }
    }

    /// Requires `value`, when present, to be `>= 0`.
    pub fn optional_non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.non_negative(field, value);
        }
    }

    /// Requires `min <= len <= max` (`max` of `None` means unbounded).
    pub fn length(&mut self, field: &str, len: usize, min: usize, max: Option<usize>) {
        if len < min {
            let message = if min == 1 {
                format!("At least one entry is required in {field}")
            } else {
                format!("{field} must contain at least {min} entries")
            };
            self.push(field, Constraint::Length, message);
        } else if let Some(max) = max {
            if len > max {
                self.push(
                    field,
                    Constraint::Length,
                    format!("{field} must contain at most {max} entries"),
                );
            }
        }
    }

    /// Validates a nested payload under `field`.
    pub fn nested<T: Validate + ?Sized>(&mut self, field: &str, value: &T) {
        self.prefix.push(field.to_string());
        value.check(self);
        self.prefix.pop();
    }

    /// Validates a nested payload under `field`, when present.
    pub fn optional_nested<T: Validate>(&mut self, field: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.nested(field, value);
        }
    }

    /// Validates every element of `items` under `field[i]`.
    pub fn each<T: Validate>(&mut self, field: &str, items: &[T]) {
        self.prefix.push(field.to_string());
        for (i, item) in items.iter().enumerate() {
            self.prefix.push(format!("[{i}]"));
            item.check(self);
            self.prefix.pop();
        }
        self.prefix.pop();
    }

    /// Finishes validation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if any violation was recorded.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Line {
        quantity: f64,
        account: String,
    }

    impl Validate for Line {
        fn check(&self, v: &mut Validator) {
            v.required("account", &self.account);
            v.positive("quantity", self.quantity);
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        date: String,
        lines: Vec<Line>,
    }

    impl Validate for Doc {
        fn check(&self, v: &mut Validator) {
            v.date("date", &self.date);
            v.length("lines", self.lines.len(), 1, Some(2));
            v.each("lines", &self.lines);
        }
    }

    #[test]
    fn test_nested_paths_are_indexed() {
        let doc = Doc {
            date: "2024-01-01".to_string(),
            lines: vec![
                Line {
                    quantity: 1.0,
                    account: "a".to_string(),
                },
                Line {
                    quantity: 0.0,
                    account: String::new(),
                },
            ],
        };

        let errors = doc.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.field("lines[1].account").unwrap().constraint,
            Constraint::Required
        );
        assert_eq!(
            errors.field("lines[1].quantity").unwrap().constraint,
            Constraint::Range
        );
    }

    #[test]
    fn test_length_bounds() {
        let doc = Doc {
            date: "2024-01-01".to_string(),
            lines: Vec::new(),
        };
        let errors = doc.validate().unwrap_err();
        assert_eq!(errors.field("lines").unwrap().constraint, Constraint::Length);
    }

    #[test]
    fn test_validate_returns_value_unchanged() {
        let doc = Doc {
            date: "2024-01-01".to_string(),
            lines: vec![Line {
                quantity: 2.0,
                account: "acc".to_string(),
            }],
        };
        let expected = Doc {
            date: "2024-01-01".to_string(),
            lines: vec![Line {
                quantity: 2.0,
                account: "acc".to_string(),
            }],
        };
        assert_eq!(validate(doc).unwrap(), expected);
    }

    #[test]
    fn test_nan_is_a_type_error() {
        let line = Line {
            quantity: f64::NAN,
            account: "a".to_string(),
        };
        let errors = line.validate().unwrap_err();
        assert_eq!(errors.field("quantity").unwrap().constraint, Constraint::Type);
    }

    #[test]
    fn test_from_value_reports_missing_field() {
        let result: Result<Doc, _> = from_value(serde_json::json!({ "lines": [] }));
        let errors = result.unwrap_err();
        let error = errors.field("date").unwrap();
        assert_eq!(error.constraint, Constraint::Required);
    }

    #[test]
    fn test_from_value_reports_nested_missing_field_by_leaf_name() {
        let result: Result<Doc, _> = from_value(serde_json::json!({
            "date": "2024-01-01",
            "lines": [{ "quantity": 1.0 }]
        }));
        let errors = result.unwrap_err();
        let error = errors.field("account").unwrap();
        assert_eq!(error.constraint, Constraint::Required);
        assert!(errors.field("lines[0].account").is_none());
    }

    #[test]
    fn test_required_accepts_whitespace_only() {
        let line = Line {
            quantity: 1.0,
            account: "  ".to_string(),
        };
        assert!(line.validate().is_ok());

        let line = Line {
            quantity: 1.0,
            account: String::new(),
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_from_value_reports_wrong_type() {
        let result: Result<Doc, _> =
            from_value(serde_json::json!({ "date": 20240101, "lines": [] }));
        let errors = result.unwrap_err();
        assert_eq!(errors.iter().next().unwrap().constraint, Constraint::Type);
    }

    #[test]
    fn test_display_joins_errors() {
        let doc = Doc {
            date: "01/01/2024".to_string(),
            lines: Vec::new(),
        };
        let message = doc.validate().unwrap_err().to_string();
        assert!(message.contains("date: Date must be in YYYY-MM-DD format"));
        assert!(message.contains("; lines: "));
    }
}
