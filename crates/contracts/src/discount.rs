//! Discount code entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ConstraintKind, FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;

/// Redeemable code format: uppercase letters, digits, dashes, underscores.
const CODE_PATTERN: &str = r"^[A-Z0-9_-]{3,40}$";

/// How the discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DiscountType {
    Percentage,
    FixedAmount,
    FreeNights,
}

impl DiscountType {
    pub const VALUES: &'static [&'static str] = &["PERCENTAGE", "FIXED_AMOUNT", "FREE_NIGHTS"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::FixedAmount => "FIXED_AMOUNT",
            Self::FreeNights => "FREE_NIGHTS",
        }
    }
}

/// Sort keys accepted by the discount list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum DiscountSortKey {
    Code,
    Value,
    StartDate,
    CreatedAt,
}

impl DiscountSortKey {
    pub const VALUES: &'static [&'static str] = &["code", "value", "startDate", "createdAt"];
}

/// A fully-formed discount record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Discount {
    pub id: EntityId,
    pub code: String,
    pub name: Option<String>,
    pub discount_type: DiscountType,
    /// Percentage (≤ 100), amount, or nights — disambiguated by type.
    pub value: f64,
    pub max_uses: Option<i64>,
    pub used_count: i64,
    pub min_nights: Option<i64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateDiscount {
    pub code: String,
    pub name: Option<String>,
    pub discount_type: DiscountType,
    pub value: f64,
    pub max_uses: Option<i64>,
    pub min_nights: Option<i64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateDiscount {
    pub id: EntityId,
    pub name: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub value: Option<f64>,
    pub max_uses: Option<i64>,
    pub min_nights: Option<i64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountFilter {
    pub search: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub sort_by: Option<DiscountSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "discount",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::optional("name").text(MAX_NAME_LEN),
            FieldRule::required("discountType").one_of(DiscountType::VALUES),
            FieldRule::required("value").positive(),
            FieldRule::optional("maxUses").int_at_least(1),
            FieldRule::required("usedCount").int_at_least(0),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agencyId").id(),
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
        "discount.create",
        vec![
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::optional("name").text(MAX_NAME_LEN),
            FieldRule::required("discountType").one_of(DiscountType::VALUES),
            FieldRule::required("value").positive(),
            FieldRule::optional("maxUses").int_at_least(1),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "discount.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text(MAX_NAME_LEN),
            FieldRule::optional("discountType").one_of(DiscountType::VALUES),
            FieldRule::optional("value").positive(),
            FieldRule::optional("maxUses").int_at_least(1),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("discountType").one_of(DiscountType::VALUES),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(DiscountSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("discount.filter", rules)
}

/// A percentage discount's value cannot exceed 100.
fn percentage_bound(
    violations: &mut Vec<FieldViolation>,
    discount_type: DiscountType,
    value: f64,
) {
    if discount_type == DiscountType::Percentage && value > 100.0 {
        violations.push(FieldViolation::new(
            "value",
            ConstraintKind::MaxValue,
            "value must be at most 100 for percentage discounts",
        ));
    }
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Discount, ValidationError> {
    let record: Discount = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, record.discount_type, record.value);
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
pub fn validate_create(payload: &Value) -> Result<CreateDiscount, ValidationError> {
    let input: CreateDiscount = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    percentage_bound(&mut violations, input.discount_type, input.value);
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
pub fn validate_update(payload: &Value) -> Result<UpdateDiscount, ValidationError> {
    let update: UpdateDiscount = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    if let (Some(discount_type), Some(value)) = (update.discount_type, update.value) {
        percentage_bound(&mut violations, discount_type, value);
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
pub fn validate_filter(payload: &Value) -> Result<DiscountFilter, ValidationError> {
    let filter: DiscountFilter = filter_shape().validate(payload)?;
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
    fn percentage_discount_caps_value_at_100() {
        let err = validate_create(&json!({
            "code": "SUMMER24",
            "discountType": "PERCENTAGE",
            "value": 150,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["value"]);
    }

    #[test]
    fn fixed_amount_discount_allows_large_values() {
        assert!(validate_create(&json!({
            "code": "SUMMER24",
            "discountType": "FIXED_AMOUNT",
            "value": 150,
        }))
        .is_ok());
    }

    #[test]
    fn lowercase_code_is_rejected() {
        let err = validate_create(&json!({
            "code": "summer24",
            "discountType": "PERCENTAGE",
            "value": 10,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
    }
}
