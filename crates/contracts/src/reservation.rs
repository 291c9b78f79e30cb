//! Reservation entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};
use crate::payment::PaymentStatus;

pub const MAX_SPECIAL_REQUESTS_LEN: usize = 1000;

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "CONFIRMED", "CANCELLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the reservation list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ReservationSortKey {
    CreatedAt,
    StartDate,
    EndDate,
    TotalPrice,
}

impl ReservationSortKey {
    pub const VALUES: &'static [&'static str] =
        &["createdAt", "startDate", "endDate", "totalPrice"];
}

fn default_guests() -> i64 {
    1
}

/// A fully-formed reservation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Reservation {
    pub id: EntityId,
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub agent_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub guests: i64,
    pub status: ReservationStatus,
    pub total_price: f64,
    pub currency_id: EntityId,
    pub payment_status: PaymentStatus,
    pub special_requests: Option<String>,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
    pub pricing_rule_id: Option<EntityId>,
    pub discount_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateReservation {
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub agent_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    #[serde(default = "default_guests")]
    pub guests: i64,
    #[serde(default)]
    pub status: ReservationStatus,
    pub total_price: f64,
    pub currency_id: EntityId,
    /// Starts `UNPAID`; collection flips it later.
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub special_requests: Option<String>,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
    pub pricing_rule_id: Option<EntityId>,
    pub discount_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateReservation {
    pub id: EntityId,
    pub agent_id: Option<EntityId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub guests: Option<i64>,
    pub status: Option<ReservationStatus>,
    pub total_price: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub payment_status: Option<PaymentStatus>,
    pub special_requests: Option<String>,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
    pub pricing_rule_id: Option<EntityId>,
    pub discount_id: Option<EntityId>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReservationFilter {
    pub property_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub status: Option<ReservationStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub currency_id: Option<EntityId>,
    pub start_date_from: Option<Timestamp>,
    pub start_date_to: Option<Timestamp>,
    pub end_date_from: Option<Timestamp>,
    pub end_date_to: Option<Timestamp>,
    pub total_price_from: Option<f64>,
    pub total_price_to: Option<f64>,
    pub sort_by: Option<ReservationSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "reservation",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::required("startDate").datetime(),
            FieldRule::required("endDate").datetime(),
            FieldRule::required("guests").int_at_least(1),
            FieldRule::required("status").one_of(ReservationStatus::VALUES),
            FieldRule::required("totalPrice").at_least(0.0),
            FieldRule::required("currencyId").id(),
            FieldRule::required("paymentStatus").one_of(PaymentStatus::VALUES),
            FieldRule::optional("specialRequests").text(MAX_SPECIAL_REQUESTS_LEN),
            FieldRule::optional("checkInTime").datetime(),
            FieldRule::optional("checkOutTime").datetime(),
            FieldRule::optional("pricingRuleId").id(),
            FieldRule::optional("discountId").id(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "reservation.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::required("startDate").datetime(),
            FieldRule::required("endDate").datetime(),
            FieldRule::optional("guests").int_at_least(1),
            FieldRule::optional("status").one_of(ReservationStatus::VALUES),
            FieldRule::required("totalPrice").at_least(0.0),
            FieldRule::required("currencyId").id(),
            FieldRule::optional("paymentStatus").one_of(PaymentStatus::VALUES),
            FieldRule::optional("specialRequests").text(MAX_SPECIAL_REQUESTS_LEN),
            FieldRule::optional("checkInTime").datetime(),
            FieldRule::optional("checkOutTime").datetime(),
            FieldRule::optional("pricingRuleId").id(),
            FieldRule::optional("discountId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "reservation.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("startDate").datetime(),
            FieldRule::optional("endDate").datetime(),
            FieldRule::optional("guests").int_at_least(1),
            FieldRule::optional("status").one_of(ReservationStatus::VALUES),
            FieldRule::optional("totalPrice").at_least(0.0),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("paymentStatus").one_of(PaymentStatus::VALUES),
            FieldRule::optional("specialRequests").text(MAX_SPECIAL_REQUESTS_LEN),
            FieldRule::optional("checkInTime").datetime(),
            FieldRule::optional("checkOutTime").datetime(),
            FieldRule::optional("pricingRuleId").id(),
            FieldRule::optional("discountId").id(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("guestId").id(),
        FieldRule::optional("agentId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("status").one_of(ReservationStatus::VALUES),
        FieldRule::optional("paymentStatus").one_of(PaymentStatus::VALUES),
        FieldRule::optional("currencyId").id(),
        FieldRule::optional("startDateFrom").datetime(),
        FieldRule::optional("startDateTo").datetime(),
        FieldRule::optional("endDateFrom").datetime(),
        FieldRule::optional("endDateTo").datetime(),
        FieldRule::optional("totalPriceFrom").at_least(0.0),
        FieldRule::optional("totalPriceTo").at_least(0.0),
        FieldRule::optional("sortBy").one_of(ReservationSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("reservation.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Reservation, ValidationError> {
    let record: Reservation = canonical_shape().validate(payload)?;
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

/// Validate a creation payload; the stay must end after it starts.
pub fn validate_create(payload: &Value) -> Result<CreateReservation, ValidationError> {
    let input: CreateReservation = create_shape().validate(payload)?;
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

/// Validate a partial update; the date-order check fires only when both
/// dates are supplied.
pub fn validate_update(payload: &Value) -> Result<UpdateReservation, ValidationError> {
    let update: UpdateReservation = update_shape().validate(payload)?;
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
pub fn validate_filter(payload: &Value) -> Result<ReservationFilter, ValidationError> {
    let filter: ReservationFilter = filter_shape().validate(payload)?;
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
        "totalPriceFrom",
        filter.total_price_from,
        "totalPriceTo",
        filter.total_price_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_create() -> Value {
        json!({
            "propertyId": "p1",
            "guestId": "g1",
            "startDate": "2024-06-01T14:00:00Z",
            "endDate": "2024-06-08T10:00:00Z",
            "totalPrice": 980.0,
            "currencyId": "cur_eur",
        })
    }

    #[test]
    fn minimal_create_applies_defaults() {
        let input = validate_create(&minimal_create()).unwrap();
        assert_eq!(input.guests, 1);
        assert_eq!(input.status, ReservationStatus::Pending);
        assert_eq!(input.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn create_rejects_stay_that_ends_before_it_starts() {
        let mut payload = minimal_create();
        payload["endDate"] = json!("2024-05-01T10:00:00Z");
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["endDate"]);
    }

    #[test]
    fn update_with_one_date_skips_the_order_check() {
        let update =
            validate_update(&json!({"id": "r1", "endDate": "2024-06-10T10:00:00Z"})).unwrap();
        assert!(update.start_date.is_none());
    }

    #[test]
    fn update_with_both_dates_enforces_order() {
        let err = validate_update(&json!({
            "id": "r1",
            "startDate": "2024-06-10T10:00:00Z",
            "endDate": "2024-06-01T10:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["endDate"]);
    }

    #[test]
    fn filter_rejects_inverted_date_range() {
        let err = validate_filter(&json!({
            "startDateFrom": "2024-06-10T00:00:00Z",
            "startDateTo": "2024-06-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["startDateTo"]);
    }

    #[test]
    fn create_collects_violations_across_fields() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "guests": 0,
            "status": "BOOKED",
            "totalPrice": 980.0,
            "currencyId": "cur_eur",
            "startDate": "2024-06-01T14:00:00Z",
            "endDate": "2024-06-08T10:00:00Z",
        }))
        .unwrap_err();
        assert!(err.has_field("guestId"));
        assert!(err.has_field("guests"));
        assert!(err.has_field("status"));
        assert_eq!(err.violations.len(), 3);
    }
}
