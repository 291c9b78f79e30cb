//! Named payload shapes: a rule set plus an unknown-field policy.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConstraintKind, FieldViolation, ValidationError};

use super::evaluate::check_field;
use super::rule::FieldRule;

/// Policy for payload keys not named by any field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownFields {
    /// Reject unknown keys, one violation per key. This is how write-path
    /// shapes refuse server-populated fields.
    Deny,
    /// Ignore unknown keys; typed construction drops them.
    Allow,
}

/// A named, declarative payload shape.
#[derive(Debug, Clone)]
pub struct Shape {
    name: &'static str,
    rules: Vec<FieldRule>,
    unknown_fields: UnknownFields,
}

impl Shape {
    /// New shape that denies unknown fields.
    pub fn new(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self {
            name,
            rules,
            unknown_fields: UnknownFields::Deny,
        }
    }

    /// Accept payload keys the rules do not name (read-path shapes).
    pub fn allow_unknown(mut self) -> Self {
        self.unknown_fields = UnknownFields::Allow;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run every field rule and the unknown-field policy, collecting one
    /// violation per offending field. Pure and deterministic.
    pub fn check(&self, payload: &Value) -> Vec<FieldViolation> {
        let map = match payload.as_object() {
            Some(map) => map,
            None => {
                return vec![FieldViolation::new(
                    "payload",
                    ConstraintKind::Payload,
                    "payload must be a JSON object",
                )];
            }
        };

        let mut violations = Vec::new();
        for rule in &self.rules {
            violations.extend(check_field(rule, map.get(rule.name())));
        }

        if self.unknown_fields == UnknownFields::Deny {
            let mut unknown: Vec<&str> = map
                .keys()
                .map(String::as_str)
                .filter(|key| !self.rules.iter().any(|rule| rule.name() == *key))
                .collect();
            unknown.sort_unstable();
            for key in unknown {
                violations.push(FieldViolation::new(
                    key,
                    ConstraintKind::UnknownField,
                    format!("{key} is not a recognized field"),
                ));
            }
        }

        violations
    }

    /// Validate the payload against the rules, then construct the typed
    /// shape, applying the target struct's serde defaults.
    pub fn validate<T: DeserializeOwned>(&self, payload: &Value) -> Result<T, ValidationError> {
        let violations = self.check(payload);
        if !violations.is_empty() {
            tracing::debug!(
                shape = self.name,
                violations = violations.len(),
                "payload rejected"
            );
            return Err(ValidationError::new(violations));
        }
        serde_json::from_value(payload.clone()).map_err(|err| {
            // The rules are expected to guard every field the struct needs,
            // so reaching this is a shape-definition bug, not caller input.
            tracing::error!(shape = self.name, error = %err, "typed construction failed");
            ValidationError::single(FieldViolation::new(
                "payload",
                ConstraintKind::Payload,
                format!("payload could not be decoded: {err}"),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstraintKind;
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        name: String,
        #[serde(default = "default_tier")]
        tier: String,
        max_guests: Option<i64>,
    }

    fn default_tier() -> String {
        "BASIC".to_string()
    }

    fn sample_shape() -> Shape {
        Shape::new(
            "sample",
            vec![
                FieldRule::required("name").text_bounded(1, 20),
                FieldRule::optional("tier").one_of(&["BASIC", "PRO"]),
                FieldRule::optional("maxGuests").int_at_least(1),
            ],
        )
    }

    #[test]
    fn collects_all_violations_not_just_first() {
        let violations = sample_shape().check(&json!({
            "tier": "GOLD",
            "maxGuests": 0,
        }));
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "tier", "maxGuests"]);
    }

    #[test]
    fn denies_unknown_fields() {
        let violations = sample_shape().check(&json!({
            "name": "Jane",
            "createdAt": "2024-01-01T00:00:00Z",
        }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "createdAt");
        assert_eq!(violations[0].constraint, ConstraintKind::UnknownField);
    }

    #[test]
    fn allow_unknown_ignores_extra_keys() {
        let violations = sample_shape()
            .allow_unknown()
            .check(&json!({"name": "Jane", "whatever": true}));
        assert!(violations.is_empty());
    }

    #[test]
    fn rejects_non_object_payloads() {
        let violations = sample_shape().check(&json!([1, 2, 3]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::Payload);
    }

    #[test]
    fn validate_constructs_typed_value_with_defaults() {
        let sample: Sample = sample_shape().validate(&json!({"name": "Jane"})).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "Jane".to_string(),
                tier: "BASIC".to_string(),
                max_guests: None,
            }
        );
    }

    #[test]
    fn validate_returns_error_as_data() {
        let result = sample_shape().validate::<Sample>(&json!({"name": ""}));
        let err = result.unwrap_err();
        assert!(err.has_field("name"));
        assert_eq!(err.violations.len(), 1);
    }

    #[test]
    fn non_object_payload_is_a_single_payload_violation() {
        let result = sample_shape().validate::<Sample>(&json!("nope"));
        assert_matches!(result, Err(ref err) if err.violations.len() == 1);
    }
}
