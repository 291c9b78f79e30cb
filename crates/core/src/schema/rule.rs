//! Field rules: a field name, a presence requirement, and a list of
//! composable constraints combined by logical AND.

use serde_json::Value;

use crate::error::FieldViolation;

/// Whether a field must be present (and non-null) in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A single check applied to a field value.
///
/// Checks are type-guarded: a bound that does not apply to the value's JSON
/// type records nothing and leaves the complaint to the type constraint, so
/// one bad field never produces contradictory noise.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Must be a JSON string.
    Text,
    /// String length lower bound, in characters.
    MinLength(usize),
    /// String length upper bound, in characters.
    MaxLength(usize),
    /// Must be a JSON number with no fractional part.
    Integer,
    /// Must be a JSON number.
    Number,
    /// Must be a JSON boolean.
    Boolean,
    /// Numeric lower bound, inclusive.
    MinValue(f64),
    /// Numeric upper bound, inclusive.
    MaxValue(f64),
    /// Must be strictly greater than zero.
    Positive,
    /// Must be a member of the closed value set, compared exactly.
    OneOf(&'static [&'static str]),
    /// Must match the regular expression.
    Pattern(&'static str),
    /// Must be a plausible email address.
    Email,
    /// Must be an absolute URL.
    Url,
    /// Must be an RFC 3339 date-time string.
    DateTime,
    /// Must be a non-empty identifier string within the length bound.
    Id,
    /// Must be an array of strings.
    TextArray,
    /// Must be an array of identifier strings.
    IdArray,
    /// Must be an array whose elements are drawn from the closed value set.
    EnumArray(&'static [&'static str]),
    /// Must be a JSON object; contents are not inspected.
    ObjectValue,
    /// Must be a JSON object satisfying another shape's check; nested
    /// violations are reported with a dotted field path.
    Nested(fn(&Value) -> Vec<FieldViolation>),
    /// Must be an array of objects each satisfying another shape's check.
    NestedArray(fn(&Value) -> Vec<FieldViolation>),
}

/// A declarative rule for one field of a payload shape.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub(crate) name: &'static str,
    pub(crate) presence: Presence,
    pub(crate) constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
            constraints: Vec::new(),
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            constraints: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// String with an upper length bound.
    pub fn text(self, max: usize) -> Self {
        self.with(Constraint::Text).with(Constraint::MaxLength(max))
    }

    /// String with both length bounds.
    pub fn text_bounded(self, min: usize, max: usize) -> Self {
        self.with(Constraint::Text)
            .with(Constraint::MinLength(min))
            .with(Constraint::MaxLength(max))
    }

    /// Non-empty identifier string.
    pub fn id(self) -> Self {
        self.with(Constraint::Id)
    }

    pub fn boolean(self) -> Self {
        self.with(Constraint::Boolean)
    }

    pub fn integer(self) -> Self {
        self.with(Constraint::Integer)
    }

    pub fn number(self) -> Self {
        self.with(Constraint::Number)
    }

    /// RFC 3339 date-time string.
    pub fn datetime(self) -> Self {
        self.with(Constraint::DateTime)
    }

    /// Number with an inclusive lower bound.
    pub fn at_least(self, min: f64) -> Self {
        self.with(Constraint::Number).with(Constraint::MinValue(min))
    }

    /// Number within an inclusive range.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.with(Constraint::Number)
            .with(Constraint::MinValue(min))
            .with(Constraint::MaxValue(max))
    }

    /// Integer with an inclusive lower bound.
    pub fn int_at_least(self, min: i64) -> Self {
        self.with(Constraint::Integer)
            .with(Constraint::MinValue(min as f64))
    }

    /// Integer within an inclusive range.
    pub fn int_range(self, min: i64, max: i64) -> Self {
        self.with(Constraint::Integer)
            .with(Constraint::MinValue(min as f64))
            .with(Constraint::MaxValue(max as f64))
    }

    /// Number strictly greater than zero.
    pub fn positive(self) -> Self {
        self.with(Constraint::Number).with(Constraint::Positive)
    }

    /// String drawn from a closed value set.
    pub fn one_of(self, values: &'static [&'static str]) -> Self {
        self.with(Constraint::Text).with(Constraint::OneOf(values))
    }

    /// String matching a regular expression.
    pub fn pattern(self, pattern: &'static str) -> Self {
        self.with(Constraint::Text)
            .with(Constraint::Pattern(pattern))
    }

    pub fn email(self) -> Self {
        self.with(Constraint::Text).with(Constraint::Email)
    }

    pub fn url(self) -> Self {
        self.with(Constraint::Text).with(Constraint::Url)
    }

    pub fn text_array(self) -> Self {
        self.with(Constraint::TextArray)
    }

    pub fn id_array(self) -> Self {
        self.with(Constraint::IdArray)
    }

    pub fn enum_array(self, values: &'static [&'static str]) -> Self {
        self.with(Constraint::EnumArray(values))
    }

    /// Free-form JSON object.
    pub fn object(self) -> Self {
        self.with(Constraint::ObjectValue)
    }

    /// Embedded object validated by another shape's check.
    pub fn nested(self, check: fn(&Value) -> Vec<FieldViolation>) -> Self {
        self.with(Constraint::Nested(check))
    }

    /// Embedded array of objects validated by another shape's check.
    pub fn nested_array(self, check: fn(&Value) -> Vec<FieldViolation>) -> Self {
        self.with(Constraint::NestedArray(check))
    }
}
