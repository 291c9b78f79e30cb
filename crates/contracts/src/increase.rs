//! Rent increase entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ConstraintKind, FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_REASON_LEN: usize = 500;

/// Lifecycle of a proposed rent increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum IncreaseStatus {
    Proposed,
    Approved,
    Applied,
    Rejected,
}

impl IncreaseStatus {
    pub const VALUES: &'static [&'static str] = &["PROPOSED", "APPROVED", "APPLIED", "REJECTED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "PROPOSED",
            Self::Approved => "APPROVED",
            Self::Applied => "APPLIED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl Default for IncreaseStatus {
    fn default() -> Self {
        Self::Proposed
    }
}

/// Sort keys accepted by the increase list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum IncreaseSortKey {
    EffectiveDate,
    CreatedAt,
}

impl IncreaseSortKey {
    pub const VALUES: &'static [&'static str] = &["effectiveDate", "createdAt"];
}

/// A fully-formed increase record. Exactly one of `percentage` / `amount`
/// drives the new rent; at least one must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Increase {
    pub id: EntityId,
    pub property_id: EntityId,
    pub contract_id: Option<EntityId>,
    pub percentage: Option<f64>,
    pub amount: Option<f64>,
    pub effective_date: Timestamp,
    pub reason: Option<String>,
    pub status: IncreaseStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateIncrease {
    pub property_id: EntityId,
    pub contract_id: Option<EntityId>,
    pub percentage: Option<f64>,
    pub amount: Option<f64>,
    pub effective_date: Timestamp,
    pub reason: Option<String>,
    #[serde(default)]
    pub status: IncreaseStatus,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateIncrease {
    pub id: EntityId,
    pub percentage: Option<f64>,
    pub amount: Option<f64>,
    pub effective_date: Option<Timestamp>,
    pub reason: Option<String>,
    pub status: Option<IncreaseStatus>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IncreaseFilter {
    pub property_id: Option<EntityId>,
    pub contract_id: Option<EntityId>,
    pub status: Option<IncreaseStatus>,
    pub effective_date_from: Option<Timestamp>,
    pub effective_date_to: Option<Timestamp>,
    pub sort_by: Option<IncreaseSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "increase",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::optional("contractId").id(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::optional("amount").positive(),
            FieldRule::required("effectiveDate").datetime(),
            FieldRule::optional("reason").text(MAX_REASON_LEN),
            FieldRule::required("status").one_of(IncreaseStatus::VALUES),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "increase.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::optional("contractId").id(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::optional("amount").positive(),
            FieldRule::required("effectiveDate").datetime(),
            FieldRule::optional("reason").text(MAX_REASON_LEN),
            FieldRule::optional("status").one_of(IncreaseStatus::VALUES),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "increase.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::optional("amount").positive(),
            FieldRule::optional("effectiveDate").datetime(),
            FieldRule::optional("reason").text(MAX_REASON_LEN),
            FieldRule::optional("status").one_of(IncreaseStatus::VALUES),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("contractId").id(),
        FieldRule::optional("status").one_of(IncreaseStatus::VALUES),
        FieldRule::optional("effectiveDateFrom").datetime(),
        FieldRule::optional("effectiveDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(IncreaseSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("increase.filter", rules)
}

fn require_percentage_or_amount(
    violations: &mut Vec<FieldViolation>,
    percentage: Option<f64>,
    amount: Option<f64>,
) {
    if percentage.is_none() && amount.is_none() {
        violations.push(FieldViolation::new(
            "percentage",
            ConstraintKind::Required,
            "either percentage or amount is required",
        ));
    }
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Increase, ValidationError> {
    let record: Increase = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    require_percentage_or_amount(&mut violations, record.percentage, record.amount);
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; one of `percentage` / `amount` must be set.
pub fn validate_create(payload: &Value) -> Result<CreateIncrease, ValidationError> {
    let input: CreateIncrease = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    require_percentage_or_amount(&mut violations, input.percentage, input.amount);
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateIncrease, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<IncreaseFilter, ValidationError> {
    let filter: IncreaseFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "effectiveDateFrom",
        filter.effective_date_from,
        "effectiveDateTo",
        filter.effective_date_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_percentage_or_amount() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "effectiveDate": "2024-09-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["percentage"]);
    }

    #[test]
    fn create_accepts_amount_alone() {
        assert!(validate_create(&json!({
            "propertyId": "p1",
            "amount": 75.0,
            "effectiveDate": "2024-09-01T00:00:00Z",
        }))
        .is_ok());
    }
}
