//! Contract pieces shared across entity modules: pagination bounds and
//! defaults, the sort direction, the cross-entity priority scale, and the
//! From/To range-ordering helpers used by filter refinements.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use rentora_core::error::{ConstraintKind, FieldViolation};
use rentora_core::schema::FieldRule;
use rentora_core::types::Timestamp;

/* --------------------------------------------------------------------------
   Pagination
   -------------------------------------------------------------------------- */

/// First page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size applied when a filter omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 100;

pub fn default_page() -> i64 {
    DEFAULT_PAGE
}

pub fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// serde default for `isActive`-style flags that start enabled.
pub fn default_true() -> bool {
    true
}

/// The `page` / `pageSize` rules appended to every filter shape.
pub fn pagination_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::optional("page").int_at_least(DEFAULT_PAGE),
        FieldRule::optional("pageSize").int_range(1, MAX_PAGE_SIZE),
    ]
}

/* --------------------------------------------------------------------------
   Shared enumerations
   -------------------------------------------------------------------------- */

/// Sort direction shared by every filter shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const VALUES: &'static [&'static str] = &["asc", "desc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Priority scale shared by tickets, tasks, and tax records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const VALUES: &'static [&'static str] = &["LOW", "MEDIUM", "HIGH", "URGENT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/* --------------------------------------------------------------------------
   Cross-field refinement helpers
   -------------------------------------------------------------------------- */

/// Record a violation when an end date fails to come strictly after the
/// start date. Fires only when both are present, so partial updates that
/// touch one date alone pass through.
pub fn check_period(
    violations: &mut Vec<FieldViolation>,
    start_name: &str,
    start: Option<Timestamp>,
    end_name: &str,
    end: Option<Timestamp>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            violations.push(FieldViolation::new(
                end_name,
                ConstraintKind::FieldOrder,
                format!("{end_name} must be after {start_name}"),
            ));
        }
    }
}

/// Record a violation when a `From`/`To` filter pair is inverted. Equal
/// bounds are a valid single-instant range.
pub fn check_date_range(
    violations: &mut Vec<FieldViolation>,
    from_name: &str,
    from: Option<Timestamp>,
    to_name: &str,
    to: Option<Timestamp>,
) {
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            violations.push(FieldViolation::new(
                to_name,
                ConstraintKind::FieldOrder,
                format!("{to_name} must not be before {from_name}"),
            ));
        }
    }
}

/// Record a violation when a min/max numeric filter pair is inverted.
pub fn check_numeric_range(
    violations: &mut Vec<FieldViolation>,
    min_name: &str,
    min: Option<f64>,
    max_name: &str,
    max: Option<f64>,
) {
    if let (Some(min), Some(max)) = (min, max) {
        if max < min {
            violations.push(FieldViolation::new(
                max_name,
                ConstraintKind::FieldOrder,
                format!("{max_name} must not be less than {min_name}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ts(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn period_rejects_equal_endpoints() {
        let mut violations = Vec::new();
        check_period(
            &mut violations,
            "startDate",
            Some(ts(2024, 6, 1)),
            "endDate",
            Some(ts(2024, 6, 1)),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "endDate");
    }

    #[test]
    fn period_passes_when_one_side_absent() {
        let mut violations = Vec::new();
        check_period(
            &mut violations,
            "startDate",
            Some(ts(2024, 6, 1)),
            "endDate",
            None,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn date_range_allows_equal_bounds() {
        let mut violations = Vec::new();
        check_date_range(
            &mut violations,
            "createdAtFrom",
            Some(ts(2024, 6, 1)),
            "createdAtTo",
            Some(ts(2024, 6, 1)),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn numeric_range_rejects_inverted_pair() {
        let mut violations = Vec::new();
        check_numeric_range(
            &mut violations,
            "amountMin",
            Some(100.0),
            "amountMax",
            Some(50.0),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "amountMax");
    }
}
