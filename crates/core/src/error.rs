//! Structured validation errors.
//!
//! Validation failures are values, never panics: every offending field
//! contributes one [`FieldViolation`], and the full set travels in a single
//! [`ValidationError`] so a form can highlight all problems at once.

use serde::{Deserialize, Serialize};

/// The class of constraint a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Required,
    UnknownField,
    TypeMismatch,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    EnumMembership,
    Pattern,
    Email,
    Url,
    DateTime,
    FieldOrder,
    Payload,
}

impl ConstraintKind {
    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::UnknownField => "unknown_field",
            Self::TypeMismatch => "type_mismatch",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::MinValue => "min_value",
            Self::MaxValue => "max_value",
            Self::EnumMembership => "enum_membership",
            Self::Pattern => "pattern",
            Self::Email => "email",
            Self::Url => "url",
            Self::DateTime => "date_time",
            Self::FieldOrder => "field_order",
            Self::Payload => "payload",
        }
    }
}

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path of the offending field, e.g. `location.city`.
    pub field: String,
    pub constraint: ConstraintKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        constraint: ConstraintKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint,
            message: message.into(),
            value: None,
        }
    }

    /// Attach the rejected value for diagnostics.
    pub fn with_value(mut self, value: &serde_json::Value) -> Self {
        self.value = Some(value.clone());
        self
    }
}

/// Aggregate of every violation found while validating one payload.
///
/// Returned as data, serializable as-is, so the transport layer can forward
/// it to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// The offending field paths, in reporting order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Whether any violation names the given field path.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Convert collected violations into a `Result`: `Ok` when empty.
pub fn into_result(violations: Vec<FieldViolation>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_counts_violations() {
        let err = ValidationError::new(vec![
            FieldViolation::new("name", ConstraintKind::Required, "name is required"),
            FieldViolation::new("rating", ConstraintKind::MaxValue, "rating must be at most 5"),
        ]);
        assert_eq!(err.to_string(), "validation failed with 2 violation(s)");
    }

    #[test]
    fn has_field_matches_exact_path() {
        let err = ValidationError::single(FieldViolation::new(
            "location.city",
            ConstraintKind::Required,
            "location.city is required",
        ));
        assert!(err.has_field("location.city"));
        assert!(!err.has_field("location"));
    }

    #[test]
    fn serializes_without_absent_value() {
        let violation = FieldViolation::new("status", ConstraintKind::EnumMembership, "bad");
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["constraint"], json!("enum_membership"));
        assert!(json.get("value").is_none());
    }

    #[test]
    fn into_result_is_ok_when_empty() {
        assert!(into_result(Vec::new()).is_ok());
        assert!(into_result(vec![FieldViolation::new(
            "page",
            ConstraintKind::MinValue,
            "page must be at least 1",
        )])
        .is_err());
    }
}
