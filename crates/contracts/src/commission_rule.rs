//! Commission rule entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ConstraintKind, FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;

/// How the commission is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CommissionRuleType {
    Percentage,
    FlatFee,
    Tiered,
}

impl CommissionRuleType {
    pub const VALUES: &'static [&'static str] = &["PERCENTAGE", "FLAT_FEE", "TIERED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::FlatFee => "FLAT_FEE",
            Self::Tiered => "TIERED",
        }
    }
}

/// Sort keys accepted by the commission rule list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CommissionRuleSortKey {
    Commission,
    StartDate,
    CreatedAt,
}

impl CommissionRuleSortKey {
    pub const VALUES: &'static [&'static str] = &["commission", "startDate", "createdAt"];
}

/// A fully-formed commission rule record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionRule {
    pub id: EntityId,
    pub name: String,
    pub rule_type: CommissionRuleType,
    /// Commission percentage, 0–100 (flat fees reuse the field as an
    /// absolute amount; the rule type disambiguates).
    pub commission: f64,
    pub provider_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub min_volume: Option<f64>,
    pub max_volume: Option<f64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a commission rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCommissionRule {
    pub name: String,
    pub rule_type: CommissionRuleType,
    pub commission: f64,
    pub provider_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub min_volume: Option<f64>,
    pub max_volume: Option<f64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCommissionRule {
    pub id: EntityId,
    pub name: Option<String>,
    pub rule_type: Option<CommissionRuleType>,
    pub commission: Option<f64>,
    pub provider_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub min_volume: Option<f64>,
    pub max_volume: Option<f64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionRuleFilter {
    pub provider_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub rule_type: Option<CommissionRuleType>,
    pub is_active: Option<bool>,
    pub commission_min: Option<f64>,
    pub commission_max: Option<f64>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub end_date_from: Option<Timestamp>,
    pub end_date_to: Option<Timestamp>,
    pub sort_by: Option<CommissionRuleSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "commission_rule",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("ruleType").one_of(CommissionRuleType::VALUES),
            FieldRule::required("commission").at_least(0.0),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("minVolume").at_least(0.0),
            FieldRule::optional("maxVolume").at_least(0.0),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::required("isActive").boolean(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "commission_rule.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("ruleType").one_of(CommissionRuleType::VALUES),
            FieldRule::required("commission").at_least(0.0),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("minVolume").at_least(0.0),
            FieldRule::optional("maxVolume").at_least(0.0),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "commission_rule.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("ruleType").one_of(CommissionRuleType::VALUES),
            FieldRule::optional("commission").at_least(0.0),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("minVolume").at_least(0.0),
            FieldRule::optional("maxVolume").at_least(0.0),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("providerId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("ruleType").one_of(CommissionRuleType::VALUES),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("commissionMin").at_least(0.0),
        FieldRule::optional("commissionMax").at_least(0.0),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("endDateFrom").datetime(),
        FieldRule::optional("endDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(CommissionRuleSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("commission_rule.filter", rules)
}

/// A percentage rule's commission cannot exceed 100.
fn percentage_bound(
    violations: &mut Vec<FieldViolation>,
    rule_type: CommissionRuleType,
    commission: f64,
) {
    if rule_type == CommissionRuleType::Percentage && commission > 100.0 {
        violations.push(FieldViolation::new(
            "commission",
            ConstraintKind::MaxValue,
            "commission must be at most 100 for percentage rules",
        ));
    }
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<CommissionRule, ValidationError> {
    let record: CommissionRule = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, record.rule_type, record.commission);
    common::check_period(
        &mut violations,
        "startDate",
        record.start_date,
        "endDate",
        record.end_date,
    );
    common::check_numeric_range(
        &mut violations,
        "minVolume",
        record.min_volume,
        "maxVolume",
        record.max_volume,
    );
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; `isActive` defaults to true.
pub fn validate_create(payload: &Value) -> Result<CreateCommissionRule, ValidationError> {
    let input: CreateCommissionRule = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, input.rule_type, input.commission);
    common::check_period(
        &mut violations,
        "startDate",
        input.start_date,
        "endDate",
        input.end_date,
    );
    common::check_numeric_range(
        &mut violations,
        "minVolume",
        input.min_volume,
        "maxVolume",
        input.max_volume,
    );
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateCommissionRule, ValidationError> {
    let update: UpdateCommissionRule = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    if let (Some(rule_type), Some(commission)) = (update.rule_type, update.commission) {
        percentage_bound(&mut violations, rule_type, commission);
    }
    common::check_period(
        &mut violations,
        "startDate",
        update.start_date,
        "endDate",
        update.end_date,
    );
    into_result(violations)?;
    Ok(update)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<CommissionRuleFilter, ValidationError> {
    let filter: CommissionRuleFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_numeric_range(
        &mut violations,
        "commissionMin",
        filter.commission_min,
        "commissionMax",
        filter.commission_max,
    );
    common::check_date_range(
        &mut violations,
        "startDateFrom",
        filter.start_date_from,
        "startDateTo",
        filter.start_date_to,
    );
    common::check_date_range(
        &mut violations,
        "endDateFrom",
        filter.end_date_from,
        "endDateTo",
        filter.end_date_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_rejects_page_size_over_maximum() {
        let err = validate_filter(&json!({"pageSize": 500})).unwrap_err();
        assert_eq!(err.fields(), vec!["pageSize"]);
    }

    #[test]
    fn filter_accepts_page_size_at_maximum() {
        let filter = validate_filter(&json!({"pageSize": 100})).unwrap();
        assert_eq!(filter.page_size, 100);
    }

    #[test]
    fn percentage_rule_caps_commission_at_100() {
        let err = validate_create(&json!({
            "name": "Standard split",
            "ruleType": "PERCENTAGE",
            "commission": 120.0,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["commission"]);
    }

    #[test]
    fn flat_fee_rule_allows_commission_over_100() {
        let input = validate_create(&json!({
            "name": "Fixed placement fee",
            "ruleType": "FLAT_FEE",
            "commission": 250.0,
        }))
        .unwrap();
        assert!(input.is_active);
    }
}
