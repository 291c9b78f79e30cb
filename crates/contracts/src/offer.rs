//! Offer entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_MESSAGE_LEN: usize = 1000;

/// Negotiation state of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
    Expired,
}

impl OfferStatus {
    pub const VALUES: &'static [&'static str] =
        &["PENDING", "ACCEPTED", "REJECTED", "WITHDRAWN", "EXPIRED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Withdrawn => "WITHDRAWN",
            Self::Expired => "EXPIRED",
        }
    }
}

impl Default for OfferStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the offer list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum OfferSortKey {
    Amount,
    ValidUntil,
    CreatedAt,
}

impl OfferSortKey {
    pub const VALUES: &'static [&'static str] = &["amount", "validUntil", "createdAt"];
}

/// A fully-formed offer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Offer {
    pub id: EntityId,
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub amount: f64,
    pub currency_id: EntityId,
    pub status: OfferStatus,
    pub valid_until: Option<Timestamp>,
    pub message: Option<String>,
    /// Set when this offer counters an earlier one.
    pub counter_offer_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateOffer {
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub amount: f64,
    pub currency_id: EntityId,
    #[serde(default)]
    pub status: OfferStatus,
    pub valid_until: Option<Timestamp>,
    pub message: Option<String>,
    pub counter_offer_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateOffer {
    pub id: EntityId,
    pub amount: Option<f64>,
    pub status: Option<OfferStatus>,
    pub valid_until: Option<Timestamp>,
    pub message: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OfferFilter {
    pub property_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub status: Option<OfferStatus>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub valid_until_from: Option<Timestamp>,
    pub valid_until_to: Option<Timestamp>,
    pub sort_by: Option<OfferSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "offer",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::required("status").one_of(OfferStatus::VALUES),
            FieldRule::optional("validUntil").datetime(),
            FieldRule::optional("message").text(MAX_MESSAGE_LEN),
            FieldRule::optional("counterOfferId").id(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "offer.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::optional("status").one_of(OfferStatus::VALUES),
            FieldRule::optional("validUntil").datetime(),
            FieldRule::optional("message").text(MAX_MESSAGE_LEN),
            FieldRule::optional("counterOfferId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "offer.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("amount").positive(),
            FieldRule::optional("status").one_of(OfferStatus::VALUES),
            FieldRule::optional("validUntil").datetime(),
            FieldRule::optional("message").text(MAX_MESSAGE_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("guestId").id(),
        FieldRule::optional("status").one_of(OfferStatus::VALUES),
        FieldRule::optional("amountMin").at_least(0.0),
        FieldRule::optional("amountMax").at_least(0.0),
        FieldRule::optional("validUntilFrom").datetime(),
        FieldRule::optional("validUntilTo").datetime(),
        FieldRule::optional("sortBy").one_of(OfferSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("offer.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Offer, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateOffer, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateOffer, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<OfferFilter, ValidationError> {
    let filter: OfferFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_numeric_range(
        &mut violations,
        "amountMin",
        filter.amount_min,
        "amountMax",
        filter.amount_max,
    );
    common::check_date_range(
        &mut violations,
        "validUntilFrom",
        filter.valid_until_from,
        "validUntilTo",
        filter.valid_until_to,
    );
    into_result(violations)?;
    Ok(filter)
}
