//! Mortgage entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_LENDER_LEN: usize = 120;

/// Repayment state of a mortgage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum MortgageStatus {
    Active,
    PaidOff,
    Defaulted,
    Refinanced,
}

impl MortgageStatus {
    pub const VALUES: &'static [&'static str] = &["ACTIVE", "PAID_OFF", "DEFAULTED", "REFINANCED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::PaidOff => "PAID_OFF",
            Self::Defaulted => "DEFAULTED",
            Self::Refinanced => "REFINANCED",
        }
    }
}

impl Default for MortgageStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Sort keys accepted by the mortgage list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MortgageSortKey {
    Principal,
    StartDate,
    CreatedAt,
}

impl MortgageSortKey {
    pub const VALUES: &'static [&'static str] = &["principal", "startDate", "createdAt"];
}

/// A fully-formed mortgage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Mortgage {
    pub id: EntityId,
    pub property_id: EntityId,
    pub lender: String,
    pub principal: f64,
    /// Annual rate, percent.
    pub interest_rate: f64,
    pub term_months: i64,
    pub start_date: Timestamp,
    pub monthly_payment: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub status: MortgageStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a mortgage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateMortgage {
    pub property_id: EntityId,
    pub lender: String,
    pub principal: f64,
    pub interest_rate: f64,
    pub term_months: i64,
    pub start_date: Timestamp,
    pub monthly_payment: Option<f64>,
    pub currency_id: Option<EntityId>,
    #[serde(default)]
    pub status: MortgageStatus,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateMortgage {
    pub id: EntityId,
    pub lender: Option<String>,
    pub principal: Option<f64>,
    pub interest_rate: Option<f64>,
    pub term_months: Option<i64>,
    pub start_date: Option<Timestamp>,
    pub monthly_payment: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub status: Option<MortgageStatus>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MortgageFilter {
    pub property_id: Option<EntityId>,
    pub status: Option<MortgageStatus>,
    pub principal_min: Option<f64>,
    pub principal_max: Option<f64>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub sort_by: Option<MortgageSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "mortgage",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("lender").text_bounded(1, MAX_LENDER_LEN),
            FieldRule::required("principal").positive(),
            FieldRule::required("interestRate").range(0.0, 100.0),
            FieldRule::required("termMonths").int_at_least(1),
            FieldRule::required("startDate").datetime(),
            FieldRule::optional("monthlyPayment").positive(),
            FieldRule::optional("currencyId").id(),
            FieldRule::required("status").one_of(MortgageStatus::VALUES),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "mortgage.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("lender").text_bounded(1, MAX_LENDER_LEN),
            FieldRule::required("principal").positive(),
            FieldRule::required("interestRate").range(0.0, 100.0),
            FieldRule::required("termMonths").int_at_least(1),
            FieldRule::required("startDate").datetime(),
            FieldRule::optional("monthlyPayment").positive(),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("status").one_of(MortgageStatus::VALUES),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "mortgage.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("lender").text_bounded(1, MAX_LENDER_LEN),
            FieldRule::optional("principal").positive(),
            FieldRule::optional("interestRate").range(0.0, 100.0),
            FieldRule::optional("termMonths").int_at_least(1),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("monthlyPayment").positive(),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("status").one_of(MortgageStatus::VALUES),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("status").one_of(MortgageStatus::VALUES),
        FieldRule::optional("principalMin").at_least(0.0),
        FieldRule::optional("principalMax").at_least(0.0),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(MortgageSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("mortgage.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Mortgage, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `ACTIVE`.
pub fn validate_create(payload: &Value) -> Result<CreateMortgage, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateMortgage, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<MortgageFilter, ValidationError> {
    let filter: MortgageFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_numeric_range(
        &mut violations,
        "principalMin",
        filter.principal_min,
        "principalMax",
        filter.principal_max,
    );
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
    fn term_must_be_at_least_one_month() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "lender": "First National",
            "principal": 250000.0,
            "interestRate": 3.4,
            "termMonths": 0,
            "startDate": "2024-01-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["termMonths"]);
    }
}
