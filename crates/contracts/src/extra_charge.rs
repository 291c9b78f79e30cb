//! Extra charge entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Unit the charge is billed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ChargeType {
    PerStay,
    PerNight,
    PerGuest,
    PerUnit,
}

impl ChargeType {
    pub const VALUES: &'static [&'static str] = &["PER_STAY", "PER_NIGHT", "PER_GUEST", "PER_UNIT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerStay => "PER_STAY",
            Self::PerNight => "PER_NIGHT",
            Self::PerGuest => "PER_GUEST",
            Self::PerUnit => "PER_UNIT",
        }
    }
}

impl Default for ChargeType {
    fn default() -> Self {
        Self::PerStay
    }
}

/// Sort keys accepted by the extra charge list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ExtraChargeSortKey {
    Name,
    Amount,
    CreatedAt,
}

impl ExtraChargeSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "amount", "createdAt"];
}

/// A fully-formed extra charge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExtraCharge {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
    pub charge_type: ChargeType,
    pub currency_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    /// Whether the guest can decline the charge.
    pub is_optional: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an extra charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateExtraCharge {
    pub name: String,
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub charge_type: ChargeType,
    pub currency_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    #[serde(default = "crate::common::default_true")]
    pub is_optional: bool,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateExtraCharge {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub charge_type: Option<ChargeType>,
    pub currency_id: Option<EntityId>,
    pub is_optional: Option<bool>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExtraChargeFilter {
    pub search: Option<String>,
    pub charge_type: Option<ChargeType>,
    pub property_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub sort_by: Option<ExtraChargeSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "extra_charge",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("amount").at_least(0.0),
            FieldRule::required("chargeType").one_of(ChargeType::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("propertyId").id(),
            FieldRule::required("isOptional").boolean(),
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
        "extra_charge.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("amount").at_least(0.0),
            FieldRule::optional("chargeType").one_of(ChargeType::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("isOptional").boolean(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "extra_charge.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("amount").at_least(0.0),
            FieldRule::optional("chargeType").one_of(ChargeType::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("isOptional").boolean(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("chargeType").one_of(ChargeType::VALUES),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sortBy").one_of(ExtraChargeSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("extra_charge.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<ExtraCharge, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `chargeType` defaults to `PER_STAY`.
pub fn validate_create(payload: &Value) -> Result<CreateExtraCharge, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateExtraCharge, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ExtraChargeFilter, ValidationError> {
    filter_shape().validate(payload)
}
