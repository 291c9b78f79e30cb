//! Payment entity contracts.
//!
//! Owns [`PaymentStatus`] and [`PaymentMethod`], which reservation and
//! tax-record shapes import rather than redefining.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_REFERENCE_LEN: usize = 120;
pub const MAX_NOTES_LEN: usize = 1000;

/// Settlement state of a payment. New reservations start `UNPAID`; a
/// payment record itself is created `PENDING` once collection begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Paid,
    PartiallyRefunded,
    Refunded,
    Failed,
}

impl PaymentStatus {
    pub const VALUES: &'static [&'static str] = &[
        "UNPAID",
        "PENDING",
        "PAID",
        "PARTIALLY_REFUNDED",
        "REFUNDED",
        "FAILED",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::PartiallyRefunded => "PARTIALLY_REFUNDED",
            Self::Refunded => "REFUNDED",
            Self::Failed => "FAILED",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Unpaid
    }
}

fn default_create_status() -> PaymentStatus {
    PaymentStatus::Pending
}

/// How a payment was (or will be) made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    CreditCard,
    DebitCard,
    Paypal,
    Stripe,
    Check,
    Crypto,
    Other,
}

impl PaymentMethod {
    pub const VALUES: &'static [&'static str] = &[
        "CASH",
        "BANK_TRANSFER",
        "CREDIT_CARD",
        "DEBIT_CARD",
        "PAYPAL",
        "STRIPE",
        "CHECK",
        "CRYPTO",
        "OTHER",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::BankTransfer => "BANK_TRANSFER",
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::Paypal => "PAYPAL",
            Self::Stripe => "STRIPE",
            Self::Check => "CHECK",
            Self::Crypto => "CRYPTO",
            Self::Other => "OTHER",
        }
    }
}

/// Sort keys accepted by the payment list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PaymentSortKey {
    Amount,
    DueDate,
    PaidAt,
    CreatedAt,
}

impl PaymentSortKey {
    pub const VALUES: &'static [&'static str] = &["amount", "dueDate", "paidAt", "createdAt"];
}

/// A fully-formed payment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    pub id: EntityId,
    pub amount: f64,
    pub currency_id: EntityId,
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub reservation_id: Option<EntityId>,
    pub contract_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub provider_id: Option<EntityId>,
    /// External processor reference, e.g. a charge id.
    pub reference: Option<String>,
    pub due_date: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePayment {
    pub amount: f64,
    pub currency_id: EntityId,
    #[serde(default = "default_create_status")]
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub reservation_id: Option<EntityId>,
    pub contract_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub provider_id: Option<EntityId>,
    pub reference: Option<String>,
    pub due_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePayment {
    pub id: EntityId,
    pub amount: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
    pub provider_id: Option<EntityId>,
    pub reference: Option<String>,
    pub due_date: Option<Timestamp>,
    pub paid_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentFilter {
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
    pub reservation_id: Option<EntityId>,
    pub contract_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub provider_id: Option<EntityId>,
    pub currency_id: Option<EntityId>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub due_date_from: Option<Timestamp>,
    pub due_date_to: Option<Timestamp>,
    pub paid_at_from: Option<Timestamp>,
    pub paid_at_to: Option<Timestamp>,
    pub sort_by: Option<PaymentSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "payment",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::required("status").one_of(PaymentStatus::VALUES),
            FieldRule::optional("method").one_of(PaymentMethod::VALUES),
            FieldRule::optional("reservationId").id(),
            FieldRule::optional("contractId").id(),
            FieldRule::optional("guestId").id(),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("reference").text(MAX_REFERENCE_LEN),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidAt").datetime(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "payment.create",
        vec![
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::optional("status").one_of(PaymentStatus::VALUES),
            FieldRule::optional("method").one_of(PaymentMethod::VALUES),
            FieldRule::optional("reservationId").id(),
            FieldRule::optional("contractId").id(),
            FieldRule::optional("guestId").id(),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("reference").text(MAX_REFERENCE_LEN),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "payment.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("amount").positive(),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("status").one_of(PaymentStatus::VALUES),
            FieldRule::optional("method").one_of(PaymentMethod::VALUES),
            FieldRule::optional("providerId").id(),
            FieldRule::optional("reference").text(MAX_REFERENCE_LEN),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidAt").datetime(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("status").one_of(PaymentStatus::VALUES),
        FieldRule::optional("method").one_of(PaymentMethod::VALUES),
        FieldRule::optional("reservationId").id(),
        FieldRule::optional("contractId").id(),
        FieldRule::optional("guestId").id(),
        FieldRule::optional("providerId").id(),
        FieldRule::optional("currencyId").id(),
        FieldRule::optional("amountMin").at_least(0.0),
        FieldRule::optional("amountMax").at_least(0.0),
        FieldRule::optional("dueDateFrom").datetime(),
        FieldRule::optional("dueDateTo").datetime(),
        FieldRule::optional("paidAtFrom").datetime(),
        FieldRule::optional("paidAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(PaymentSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("payment.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Payment, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreatePayment, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdatePayment, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<PaymentFilter, ValidationError> {
    let filter: PaymentFilter = filter_shape().validate(payload)?;
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
        "dueDateFrom",
        filter.due_date_from,
        "dueDateTo",
        filter.due_date_to,
    );
    common::check_date_range(
        &mut violations,
        "paidAtFrom",
        filter.paid_at_from,
        "paidAtTo",
        filter.paid_at_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_defaults_status_to_pending() {
        let input = validate_create(&json!({"amount": 1200.0, "currencyId": "cur_eur"})).unwrap();
        assert_eq!(input.status, PaymentStatus::Pending);
    }

    #[test]
    fn create_rejects_zero_amount() {
        let err = validate_create(&json!({"amount": 0, "currencyId": "cur_eur"})).unwrap_err();
        assert_eq!(err.fields(), vec!["amount"]);
    }

    #[test]
    fn filter_rejects_inverted_amount_range() {
        let err = validate_filter(&json!({"amountMin": 500, "amountMax": 100})).unwrap_err();
        assert_eq!(err.fields(), vec!["amountMax"]);
    }

    #[test]
    fn method_outside_set_is_rejected() {
        let err = validate_update(&json!({"id": "p1", "method": "IOU"})).unwrap_err();
        assert_eq!(err.fields(), vec!["method"]);
    }
}
