//! Per-constraint checks — pure logic over raw JSON values.

use regex::Regex;
use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use crate::error::{ConstraintKind, FieldViolation};
use crate::types::MAX_ID_LEN;

use super::rule::{Constraint, FieldRule, Presence};

/// Check one field rule against the (possibly absent) value for that field.
///
/// `None` and JSON `null` are both treated as absent: required fields
/// record a violation, optional fields pass untouched.
pub(crate) fn check_field(rule: &FieldRule, value: Option<&Value>) -> Vec<FieldViolation> {
    let value = match value {
        Some(v) if !v.is_null() => v,
        _ => {
            return match rule.presence {
                Presence::Required => vec![FieldViolation::new(
                    rule.name,
                    ConstraintKind::Required,
                    format!("{} is required", rule.name),
                )],
                Presence::Optional => Vec::new(),
            };
        }
    };

    let mut violations = Vec::new();
    for constraint in &rule.constraints {
        match constraint {
            Constraint::Nested(check) => {
                check_nested(rule.name, *check, value, &mut violations);
            }
            Constraint::NestedArray(check) => {
                check_nested_array(rule.name, *check, value, &mut violations);
            }
            scalar => {
                if let Some(violation) = check_scalar(rule.name, scalar, value) {
                    violations.push(violation);
                }
            }
        }
    }
    violations
}

fn check_scalar(field: &str, constraint: &Constraint, value: &Value) -> Option<FieldViolation> {
    match constraint {
        Constraint::Text => check_text(field, value),
        Constraint::MinLength(min) => check_min_length(field, *min, value),
        Constraint::MaxLength(max) => check_max_length(field, *max, value),
        Constraint::Integer => check_integer(field, value),
        Constraint::Number => check_number(field, value),
        Constraint::Boolean => check_boolean(field, value),
        Constraint::MinValue(min) => check_min_value(field, *min, value),
        Constraint::MaxValue(max) => check_max_value(field, *max, value),
        Constraint::Positive => check_positive(field, value),
        Constraint::OneOf(values) => check_one_of(field, values, value),
        Constraint::Pattern(pattern) => check_pattern(field, pattern, value),
        Constraint::Email => check_email(field, value),
        Constraint::Url => check_url(field, value),
        Constraint::DateTime => check_datetime(field, value),
        Constraint::Id => check_id(field, value),
        Constraint::TextArray => check_text_array(field, value),
        Constraint::IdArray => check_id_array(field, value),
        Constraint::EnumArray(values) => check_enum_array(field, values, value),
        Constraint::ObjectValue => check_object(field, value),
        // Handled by the caller.
        Constraint::Nested(_) | Constraint::NestedArray(_) => None,
    }
}

fn check_text(field: &str, value: &Value) -> Option<FieldViolation> {
    if value.is_string() {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be a string"),
            )
            .with_value(value),
        )
    }
}

fn check_min_length(field: &str, min: usize, value: &Value) -> Option<FieldViolation> {
    let s = value.as_str()?;
    if s.chars().count() < min {
        Some(FieldViolation::new(
            field,
            ConstraintKind::MinLength,
            format!("{field} must be at least {min} character(s)"),
        ))
    } else {
        None
    }
}

fn check_max_length(field: &str, max: usize, value: &Value) -> Option<FieldViolation> {
    let s = value.as_str()?;
    if s.chars().count() > max {
        Some(FieldViolation::new(
            field,
            ConstraintKind::MaxLength,
            format!("{field} must be at most {max} character(s)"),
        ))
    } else {
        None
    }
}

fn check_integer(field: &str, value: &Value) -> Option<FieldViolation> {
    if value.as_i64().is_some() {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be an integer"),
            )
            .with_value(value),
        )
    }
}

fn check_number(field: &str, value: &Value) -> Option<FieldViolation> {
    if value.is_number() {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be a number"),
            )
            .with_value(value),
        )
    }
}

fn check_boolean(field: &str, value: &Value) -> Option<FieldViolation> {
    if value.is_boolean() {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be a boolean"),
            )
            .with_value(value),
        )
    }
}

fn check_min_value(field: &str, min: f64, value: &Value) -> Option<FieldViolation> {
    let num = value.as_f64()?;
    if num < min {
        Some(FieldViolation::new(
            field,
            ConstraintKind::MinValue,
            format!("{field} must be at least {min}"),
        ))
    } else {
        None
    }
}

fn check_max_value(field: &str, max: f64, value: &Value) -> Option<FieldViolation> {
    let num = value.as_f64()?;
    if num > max {
        Some(FieldViolation::new(
            field,
            ConstraintKind::MaxValue,
            format!("{field} must be at most {max}"),
        ))
    } else {
        None
    }
}

fn check_positive(field: &str, value: &Value) -> Option<FieldViolation> {
    let num = value.as_f64()?;
    if num <= 0.0 {
        Some(FieldViolation::new(
            field,
            ConstraintKind::MinValue,
            format!("{field} must be greater than zero"),
        ))
    } else {
        None
    }
}

fn check_one_of(
    field: &str,
    values: &'static [&'static str],
    value: &Value,
) -> Option<FieldViolation> {
    let s = value.as_str()?;
    if values.contains(&s) {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::EnumMembership,
                format!("{field} must be one of: {}", values.join(", ")),
            )
            .with_value(value),
        )
    }
}

fn check_pattern(field: &str, pattern: &str, value: &Value) -> Option<FieldViolation> {
    let s = value.as_str()?;
    match Regex::new(pattern) {
        Ok(re) if re.is_match(s) => None,
        Ok(_) => Some(FieldViolation::new(
            field,
            ConstraintKind::Pattern,
            format!("{field} does not match the expected format"),
        )),
        // The pattern is library-author input, not caller input.
        Err(_) => None,
    }
}

fn check_email(field: &str, value: &Value) -> Option<FieldViolation> {
    let s = value.as_str()?;
    if s.validate_email() {
        None
    } else {
        Some(FieldViolation::new(
            field,
            ConstraintKind::Email,
            format!("{field} must be a valid email address"),
        ))
    }
}

fn check_url(field: &str, value: &Value) -> Option<FieldViolation> {
    let s = value.as_str()?;
    if s.validate_url() {
        None
    } else {
        Some(FieldViolation::new(
            field,
            ConstraintKind::Url,
            format!("{field} must be a valid URL"),
        ))
    }
}

fn check_datetime(field: &str, value: &Value) -> Option<FieldViolation> {
    match value {
        Value::String(s) => {
            if chrono::DateTime::parse_from_rfc3339(s).is_ok() {
                None
            } else {
                Some(FieldViolation::new(
                    field,
                    ConstraintKind::DateTime,
                    format!("{field} must be an RFC 3339 date-time"),
                ))
            }
        }
        other => Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be a date-time string"),
            )
            .with_value(other),
        ),
    }
}

fn check_id(field: &str, value: &Value) -> Option<FieldViolation> {
    match value.as_str() {
        None => Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be a string identifier"),
            )
            .with_value(value),
        ),
        Some("") => Some(FieldViolation::new(
            field,
            ConstraintKind::MinLength,
            format!("{field} must not be empty"),
        )),
        Some(s) if s.chars().count() > MAX_ID_LEN => Some(FieldViolation::new(
            field,
            ConstraintKind::MaxLength,
            format!("{field} must be at most {MAX_ID_LEN} character(s)"),
        )),
        Some(_) => None,
    }
}

fn check_text_array(field: &str, value: &Value) -> Option<FieldViolation> {
    let arr = match value.as_array() {
        Some(arr) => arr,
        None => {
            return Some(
                FieldViolation::new(
                    field,
                    ConstraintKind::TypeMismatch,
                    format!("{field} must be an array of strings"),
                )
                .with_value(value),
            );
        }
    };
    arr.iter().enumerate().find_map(|(index, element)| {
        if element.is_string() {
            None
        } else {
            Some(
                FieldViolation::new(
                    format!("{field}[{index}]"),
                    ConstraintKind::TypeMismatch,
                    format!("{field}[{index}] must be a string"),
                )
                .with_value(element),
            )
        }
    })
}

fn check_id_array(field: &str, value: &Value) -> Option<FieldViolation> {
    let arr = match value.as_array() {
        Some(arr) => arr,
        None => {
            return Some(
                FieldViolation::new(
                    field,
                    ConstraintKind::TypeMismatch,
                    format!("{field} must be an array of identifiers"),
                )
                .with_value(value),
            );
        }
    };
    arr.iter()
        .enumerate()
        .find_map(|(index, element)| check_id(&format!("{field}[{index}]"), element))
}

fn check_enum_array(
    field: &str,
    values: &'static [&'static str],
    value: &Value,
) -> Option<FieldViolation> {
    let arr = match value.as_array() {
        Some(arr) => arr,
        None => {
            return Some(
                FieldViolation::new(
                    field,
                    ConstraintKind::TypeMismatch,
                    format!("{field} must be an array"),
                )
                .with_value(value),
            );
        }
    };
    arr.iter().enumerate().find_map(|(index, element)| {
        let indexed = format!("{field}[{index}]");
        match element.as_str() {
            None => Some(
                FieldViolation::new(
                    indexed.clone(),
                    ConstraintKind::TypeMismatch,
                    format!("{indexed} must be a string"),
                )
                .with_value(element),
            ),
            Some(s) if !values.contains(&s) => Some(
                FieldViolation::new(
                    indexed.clone(),
                    ConstraintKind::EnumMembership,
                    format!("{indexed} must be one of: {}", values.join(", ")),
                )
                .with_value(element),
            ),
            Some(_) => None,
        }
    })
}

fn check_object(field: &str, value: &Value) -> Option<FieldViolation> {
    if value.is_object() {
        None
    } else {
        Some(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be an object"),
            )
            .with_value(value),
        )
    }
}

fn check_nested(
    field: &str,
    check: fn(&Value) -> Vec<FieldViolation>,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) {
    if !value.is_object() {
        violations.push(
            FieldViolation::new(
                field,
                ConstraintKind::TypeMismatch,
                format!("{field} must be an object"),
            )
            .with_value(value),
        );
        return;
    }
    violations.extend(check(value).into_iter().map(|mut violation| {
        violation.field = format!("{field}.{}", violation.field);
        violation
    }));
}

fn check_nested_array(
    field: &str,
    check: fn(&Value) -> Vec<FieldViolation>,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) {
    let arr = match value.as_array() {
        Some(arr) => arr,
        None => {
            violations.push(
                FieldViolation::new(
                    field,
                    ConstraintKind::TypeMismatch,
                    format!("{field} must be an array"),
                )
                .with_value(value),
            );
            return;
        }
    };
    for (index, element) in arr.iter().enumerate() {
        check_nested(&format!("{field}[{index}]"), check, element, violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;
    use serde_json::json;

    fn check(rule: FieldRule, value: Option<&Value>) -> Vec<FieldViolation> {
        check_field(&rule, value)
    }

    #[test]
    fn required_passes_with_value() {
        let violations = check(FieldRule::required("name").text(50), Some(&json!("hello")));
        assert!(violations.is_empty());
    }

    #[test]
    fn required_fails_when_absent() {
        let violations = check(FieldRule::required("name").text(50), None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::Required);
    }

    #[test]
    fn required_fails_on_null() {
        let violations = check(FieldRule::required("name").text(50), Some(&Value::Null));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::Required);
    }

    #[test]
    fn optional_passes_when_absent_or_null() {
        assert!(check(FieldRule::optional("bio").text(100), None).is_empty());
        assert!(check(FieldRule::optional("bio").text(100), Some(&Value::Null)).is_empty());
    }

    #[test]
    fn length_bounds_apply_only_to_strings() {
        // The type constraint owns the complaint; the length checks stay quiet.
        let violations = check(FieldRule::optional("name").text_bounded(1, 5), Some(&json!(42)));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::TypeMismatch);
    }

    #[test]
    fn max_length_fails_over_limit() {
        let violations = check(FieldRule::optional("name").text(3), Some(&json!("hello")));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::MaxLength);
    }

    #[test]
    fn min_length_fails_on_empty() {
        let violations = check(
            FieldRule::required("name").text_bounded(1, 50),
            Some(&json!("")),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::MinLength);
    }

    #[test]
    fn integer_rejects_fractions() {
        let violations = check(FieldRule::optional("year").int_range(2000, 2100), Some(&json!(2024.5)));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::TypeMismatch);
    }

    #[test]
    fn int_range_enforces_bounds() {
        assert!(check(
            FieldRule::optional("year").int_range(2000, 2100),
            Some(&json!(2024))
        )
        .is_empty());
        let violations = check(
            FieldRule::optional("year").int_range(2000, 2100),
            Some(&json!(1999)),
        );
        assert_eq!(violations[0].constraint, ConstraintKind::MinValue);
    }

    #[test]
    fn positive_rejects_zero() {
        let violations = check(FieldRule::required("amount").positive(), Some(&json!(0)));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].constraint, ConstraintKind::MinValue);
    }

    #[test]
    fn one_of_is_exact_no_case_folding() {
        const VALUES: &[&str] = &["PENDING", "ACTIVE"];
        assert!(check(
            FieldRule::optional("status").one_of(VALUES),
            Some(&json!("ACTIVE"))
        )
        .is_empty());
        let violations = check(
            FieldRule::optional("status").one_of(VALUES),
            Some(&json!("active")),
        );
        assert_eq!(violations[0].constraint, ConstraintKind::EnumMembership);
        let violations = check(
            FieldRule::optional("status").one_of(VALUES),
            Some(&json!(" ACTIVE")),
        );
        assert_eq!(violations[0].constraint, ConstraintKind::EnumMembership);
    }

    #[test]
    fn email_and_url_checks() {
        assert!(check(
            FieldRule::optional("email").email(),
            Some(&json!("jane@example.com"))
        )
        .is_empty());
        let violations = check(FieldRule::optional("email").email(), Some(&json!("not-an-email")));
        assert_eq!(violations[0].constraint, ConstraintKind::Email);
        let violations = check(FieldRule::optional("website").url(), Some(&json!("not a url")));
        assert_eq!(violations[0].constraint, ConstraintKind::Url);
    }

    #[test]
    fn datetime_requires_rfc3339() {
        assert!(check(
            FieldRule::optional("dueDate").datetime(),
            Some(&json!("2024-06-01T00:00:00Z"))
        )
        .is_empty());
        let violations = check(
            FieldRule::optional("dueDate").datetime(),
            Some(&json!("June 1st 2024")),
        );
        assert_eq!(violations[0].constraint, ConstraintKind::DateTime);
        let violations = check(FieldRule::optional("dueDate").datetime(), Some(&json!(17)));
        assert_eq!(violations[0].constraint, ConstraintKind::TypeMismatch);
    }

    #[test]
    fn id_rejects_empty_and_oversized() {
        assert!(check(FieldRule::required("id").id(), Some(&json!("c1"))).is_empty());
        let violations = check(FieldRule::required("id").id(), Some(&json!("")));
        assert_eq!(violations[0].constraint, ConstraintKind::MinLength);
        let long = "x".repeat(MAX_ID_LEN + 1);
        let violations = check(FieldRule::required("id").id(), Some(&json!(long)));
        assert_eq!(violations[0].constraint, ConstraintKind::MaxLength);
    }

    #[test]
    fn enum_array_reports_offending_index() {
        const VALUES: &[&str] = &["POOL", "GYM"];
        let violations = check(
            FieldRule::optional("amenities").enum_array(VALUES),
            Some(&json!(["POOL", "SPA"])),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "amenities[1]");
        assert_eq!(violations[0].constraint, ConstraintKind::EnumMembership);
    }

    #[test]
    fn nested_prefixes_field_paths() {
        fn inner(_value: &Value) -> Vec<FieldViolation> {
            vec![FieldViolation::new(
                "city",
                ConstraintKind::Required,
                "city is required",
            )]
        }
        let violations = check(FieldRule::optional("location").nested(inner), Some(&json!({})));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "location.city");
    }

    #[test]
    fn nested_array_prefixes_with_index() {
        fn inner(_value: &Value) -> Vec<FieldViolation> {
            vec![FieldViolation::new(
                "url",
                ConstraintKind::Required,
                "url is required",
            )]
        }
        let violations = check(
            FieldRule::optional("photos").nested_array(inner),
            Some(&json!([{}, {}])),
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "photos[0].url");
        assert_eq!(violations[1].field, "photos[1].url");
    }
}
