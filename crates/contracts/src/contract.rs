//! Contract (tenancy agreement) entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_TERMS_LEN: usize = 10_000;

/// Lifecycle status of a tenancy contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ContractStatus {
    Draft,
    Active,
    Terminated,
    Expired,
    Cancelled,
}

impl ContractStatus {
    pub const VALUES: &'static [&'static str] =
        &["DRAFT", "ACTIVE", "TERMINATED", "EXPIRED", "CANCELLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Active => "ACTIVE",
            Self::Terminated => "TERMINATED",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for ContractStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Sort keys accepted by the contract list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ContractSortKey {
    StartDate,
    EndDate,
    RentAmount,
    CreatedAt,
}

impl ContractSortKey {
    pub const VALUES: &'static [&'static str] =
        &["startDate", "endDate", "rentAmount", "createdAt"];
}

/// A fully-formed contract record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Contract {
    pub id: EntityId,
    pub title: String,
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub agency_id: Option<EntityId>,
    pub reservation_id: Option<EntityId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub currency_id: EntityId,
    pub status: ContractStatus,
    pub terms: Option<String>,
    pub signed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateContract {
    pub title: String,
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub agency_id: Option<EntityId>,
    pub reservation_id: Option<EntityId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub rent_amount: f64,
    pub deposit_amount: Option<f64>,
    pub currency_id: EntityId,
    #[serde(default)]
    pub status: ContractStatus,
    pub terms: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateContract {
    pub id: EntityId,
    pub title: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub rent_amount: Option<f64>,
    pub deposit_amount: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub status: Option<ContractStatus>,
    pub terms: Option<String>,
    pub signed_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContractFilter {
    pub search: Option<String>,
    pub property_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub status: Option<ContractStatus>,
    pub currency_id: Option<EntityId>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub end_date_from: Option<Timestamp>,
    pub end_date_to: Option<Timestamp>,
    pub rent_amount_min: Option<f64>,
    pub rent_amount_max: Option<f64>,
    pub sort_by: Option<ContractSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "contract",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("reservationId").id(),
            FieldRule::required("startDate").datetime(),
            FieldRule::required("endDate").datetime(),
            FieldRule::required("rentAmount").positive(),
            FieldRule::optional("depositAmount").at_least(0.0),
            FieldRule::required("currencyId").id(),
            FieldRule::required("status").one_of(ContractStatus::VALUES),
            FieldRule::optional("terms").text(MAX_TERMS_LEN),
            FieldRule::optional("signedAt").datetime(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "contract.create",
        vec![
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("reservationId").id(),
            FieldRule::required("startDate").datetime(),
            FieldRule::required("endDate").datetime(),
            FieldRule::required("rentAmount").positive(),
            FieldRule::optional("depositAmount").at_least(0.0),
            FieldRule::required("currencyId").id(),
            FieldRule::optional("status").one_of(ContractStatus::VALUES),
            FieldRule::optional("terms").text(MAX_TERMS_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "contract.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("rentAmount").positive(),
            FieldRule::optional("depositAmount").at_least(0.0),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("status").one_of(ContractStatus::VALUES),
            FieldRule::optional("terms").text(MAX_TERMS_LEN),
            FieldRule::optional("signedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("guestId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("status").one_of(ContractStatus::VALUES),
        FieldRule::optional("currencyId").id(),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("endDateFrom").datetime(),
        FieldRule::optional("endDateTo").datetime(),
        FieldRule::optional("rentAmountMin").at_least(0.0),
        FieldRule::optional("rentAmountMax").at_least(0.0),
        FieldRule::optional("sortBy").one_of(ContractSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("contract.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Contract, ValidationError> {
    let record: Contract = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "startDate",
        Some(record.start_date),
        "endDate",
        Some(record.end_date),
    );
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; the term must end after it starts.
pub fn validate_create(payload: &Value) -> Result<CreateContract, ValidationError> {
    let input: CreateContract = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "startDate",
        Some(input.start_date),
        "endDate",
        Some(input.end_date),
    );
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; when both dates are supplied together they
/// must still be ordered, whichever of them is actually changing.
pub fn validate_update(payload: &Value) -> Result<UpdateContract, ValidationError> {
    let update: UpdateContract = update_shape().validate(payload)?;
    let mut violations = Vec::new();
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
pub fn validate_filter(payload: &Value) -> Result<ContractFilter, ValidationError> {
    let filter: ContractFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
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
    common::check_numeric_range(
        &mut violations,
        "rentAmountMin",
        filter.rent_amount_min,
        "rentAmountMax",
        filter.rent_amount_max,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_rejects_end_before_start_even_with_valid_dates() {
        let err = validate_update(&json!({
            "id": "c1",
            "startDate": "2024-06-01T00:00:00Z",
            "endDate": "2024-01-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["endDate"]);
    }

    #[test]
    fn update_with_only_start_date_bypasses_the_order_check() {
        let update =
            validate_update(&json!({"id": "c1", "startDate": "2024-06-01T00:00:00Z"})).unwrap();
        assert!(update.end_date.is_none());
    }

    #[test]
    fn create_requires_the_full_term() {
        let err = validate_create(&json!({
            "title": "12-month lease",
            "propertyId": "p1",
            "guestId": "g1",
            "rentAmount": 1500.0,
            "currencyId": "cur_eur",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["startDate", "endDate"]);
    }

    #[test]
    fn create_defaults_status_to_draft() {
        let input = validate_create(&json!({
            "title": "12-month lease",
            "propertyId": "p1",
            "guestId": "g1",
            "startDate": "2024-06-01T00:00:00Z",
            "endDate": "2025-06-01T00:00:00Z",
            "rentAmount": 1500.0,
            "currencyId": "cur_eur",
        }))
        .unwrap();
        assert_eq!(input.status, ContractStatus::Draft);
    }
}
