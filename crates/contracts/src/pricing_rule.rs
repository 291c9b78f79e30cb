//! Pricing rule entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ConstraintKind, FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;

/// Trigger condition for a price adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PricingRuleType {
    Seasonal,
    Weekend,
    LastMinute,
    EarlyBird,
    LongStay,
}

impl PricingRuleType {
    pub const VALUES: &'static [&'static str] =
        &["SEASONAL", "WEEKEND", "LAST_MINUTE", "EARLY_BIRD", "LONG_STAY"];
}

/// How `value` is applied to the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AdjustmentType {
    Percentage,
    Fixed,
}

impl AdjustmentType {
    pub const VALUES: &'static [&'static str] = &["PERCENTAGE", "FIXED"];
}

/// Sort keys accepted by the pricing rule list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PricingRuleSortKey {
    Priority,
    StartDate,
    CreatedAt,
}

impl PricingRuleSortKey {
    pub const VALUES: &'static [&'static str] = &["priority", "startDate", "createdAt"];
}

/// A fully-formed pricing rule record. `value` may be negative — a
/// discount — or positive — a surcharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingRule {
    pub id: EntityId,
    pub property_id: EntityId,
    pub name: String,
    pub rule_type: PricingRuleType,
    pub adjustment_type: AdjustmentType,
    pub value: f64,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_nights: Option<i64>,
    /// Higher priority wins when rules overlap.
    pub priority: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a pricing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePricingRule {
    pub property_id: EntityId,
    pub name: String,
    pub rule_type: PricingRuleType,
    pub adjustment_type: AdjustmentType,
    pub value: f64,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_nights: Option<i64>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePricingRule {
    pub id: EntityId,
    pub name: Option<String>,
    pub rule_type: Option<PricingRuleType>,
    pub adjustment_type: Option<AdjustmentType>,
    pub value: Option<f64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub min_nights: Option<i64>,
    pub priority: Option<i64>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingRuleFilter {
    pub property_id: Option<EntityId>,
    pub rule_type: Option<PricingRuleType>,
    pub adjustment_type: Option<AdjustmentType>,
    pub is_active: Option<bool>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub sort_by: Option<PricingRuleSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "pricing_rule",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("ruleType").one_of(PricingRuleType::VALUES),
            FieldRule::required("adjustmentType").one_of(AdjustmentType::VALUES),
            FieldRule::required("value").number(),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::required("priority").int_at_least(0),
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
        "pricing_rule.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("ruleType").one_of(PricingRuleType::VALUES),
            FieldRule::required("adjustmentType").one_of(AdjustmentType::VALUES),
            FieldRule::required("value").number(),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("priority").int_at_least(0),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "pricing_rule.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("ruleType").one_of(PricingRuleType::VALUES),
            FieldRule::optional("adjustmentType").one_of(AdjustmentType::VALUES),
            FieldRule::optional("value").number(),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("priority").int_at_least(0),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("ruleType").one_of(PricingRuleType::VALUES),
        FieldRule::optional("adjustmentType").one_of(AdjustmentType::VALUES),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(PricingRuleSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("pricing_rule.filter", rules)
}

/// A percentage adjustment stays within ±100.
fn percentage_bound(
    violations: &mut Vec<FieldViolation>,
    adjustment_type: AdjustmentType,
    value: f64,
) {
    if adjustment_type == AdjustmentType::Percentage && !(-100.0..=100.0).contains(&value) {
        violations.push(FieldViolation::new(
            "value",
            ConstraintKind::MaxValue,
            "value must be between -100 and 100 for percentage adjustments",
        ));
    }
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<PricingRule, ValidationError> {
    let record: PricingRule = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, record.adjustment_type, record.value);
    common::check_period(
        &mut violations,
        "startDate",
        record.start_date,
        "endDate",
        record.end_date,
    );
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreatePricingRule, ValidationError> {
    let input: CreatePricingRule = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, input.adjustment_type, input.value);
    common::check_period(
        &mut violations,
        "startDate",
        input.start_date,
        "endDate",
        input.end_date,
    );
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdatePricingRule, ValidationError> {
    let update: UpdatePricingRule = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    if let (Some(adjustment_type), Some(value)) = (update.adjustment_type, update.value) {
        percentage_bound(&mut violations, adjustment_type, value);
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
pub fn validate_filter(payload: &Value) -> Result<PricingRuleFilter, ValidationError> {
    let filter: PricingRuleFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "startDateFrom",
        filter.start_date_from,
        "startDateTo",
        filter.start_date_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn percentage_adjustment_is_bounded() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "name": "Peak season",
            "ruleType": "SEASONAL",
            "adjustmentType": "PERCENTAGE",
            "value": 150,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["value"]);
    }

    #[test]
    fn negative_percentage_discount_is_allowed() {
        assert!(validate_create(&json!({
            "propertyId": "p1",
            "name": "Winter discount",
            "ruleType": "SEASONAL",
            "adjustmentType": "PERCENTAGE",
            "value": -25,
        }))
        .is_ok());
    }
}
