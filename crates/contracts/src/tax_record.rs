//! Tax record entity contracts.
//!
//! Imports [`PaymentMethod`] from the payment module rather than
//! redefining it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, Priority, SortOrder};
use crate::payment::PaymentMethod;

pub const MAX_NOTES_LEN: usize = 1000;

pub const MIN_YEAR: i64 = 2000;
pub const MAX_YEAR: i64 = 2100;

/// Kind of tax obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TaxType {
    PropertyTax,
    IncomeTax,
    SalesTax,
    OccupancyTax,
    CityTax,
    Vat,
    StampDuty,
    Other,
}

impl TaxType {
    pub const VALUES: &'static [&'static str] = &[
        "PROPERTY_TAX",
        "INCOME_TAX",
        "SALES_TAX",
        "OCCUPANCY_TAX",
        "CITY_TAX",
        "VAT",
        "STAMP_DUTY",
        "OTHER",
    ];
}

impl Default for TaxType {
    fn default() -> Self {
        Self::PropertyTax
    }
}

/// Settlement state of a tax record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TaxStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
    Disputed,
    PartiallyPaid,
    Waived,
    Extended,
}

impl TaxStatus {
    pub const VALUES: &'static [&'static str] = &[
        "PENDING",
        "PAID",
        "OVERDUE",
        "CANCELLED",
        "DISPUTED",
        "PARTIALLY_PAID",
        "WAIVED",
        "EXTENDED",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
            Self::Disputed => "DISPUTED",
            Self::PartiallyPaid => "PARTIALLY_PAID",
            Self::Waived => "WAIVED",
            Self::Extended => "EXTENDED",
        }
    }
}

impl Default for TaxStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Recurrence cadence for recurring taxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RecurringFrequency {
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

impl RecurringFrequency {
    pub const VALUES: &'static [&'static str] = &["MONTHLY", "QUARTERLY", "YEARLY", "CUSTOM"];
}

/// Sort keys accepted by the tax record list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TaxRecordSortKey {
    Year,
    Amount,
    DueDate,
    PaidDate,
    CreatedAt,
}

impl TaxRecordSortKey {
    pub const VALUES: &'static [&'static str] =
        &["year", "amount", "dueDate", "paidDate", "createdAt"];
}

/// A fully-formed tax record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxRecord {
    pub id: EntityId,
    pub property_id: EntityId,
    pub year: i64,
    pub amount: f64,
    /// Effective rate, percent, when the tax is rate-based.
    pub percentage: Option<f64>,
    pub tax_type: TaxType,
    pub status: TaxStatus,
    pub paid: bool,
    pub paid_amount: f64,
    pub due_date: Timestamp,
    pub paid_date: Option<Timestamp>,
    pub payment_method: Option<PaymentMethod>,
    pub currency_id: Option<EntityId>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub next_due_date: Option<Timestamp>,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a tax record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTaxRecord {
    pub property_id: EntityId,
    pub year: i64,
    pub amount: f64,
    pub percentage: Option<f64>,
    #[serde(default)]
    pub tax_type: TaxType,
    #[serde(default)]
    pub status: TaxStatus,
    pub due_date: Timestamp,
    pub payment_method: Option<PaymentMethod>,
    pub currency_id: Option<EntityId>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub next_due_date: Option<Timestamp>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTaxRecord {
    pub id: EntityId,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
    pub status: Option<TaxStatus>,
    pub paid: Option<bool>,
    pub paid_amount: Option<f64>,
    pub due_date: Option<Timestamp>,
    pub paid_date: Option<Timestamp>,
    pub payment_method: Option<PaymentMethod>,
    pub currency_id: Option<EntityId>,
    pub is_recurring: Option<bool>,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub next_due_date: Option<Timestamp>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaxRecordFilter {
    pub property_id: Option<EntityId>,
    pub year: Option<i64>,
    pub status: Option<TaxStatus>,
    pub tax_type: Option<TaxType>,
    pub paid: Option<bool>,
    pub is_recurring: Option<bool>,
    pub priority: Option<Priority>,
    pub payment_method: Option<PaymentMethod>,
    pub currency_id: Option<EntityId>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub due_date_from: Option<Timestamp>,
    pub due_date_to: Option<Timestamp>,
    pub sort_by: Option<TaxRecordSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "tax_record",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("year").int_range(MIN_YEAR, MAX_YEAR),
            FieldRule::required("amount").positive(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::required("taxType").one_of(TaxType::VALUES),
            FieldRule::required("status").one_of(TaxStatus::VALUES),
            FieldRule::required("paid").boolean(),
            FieldRule::required("paidAmount").at_least(0.0),
            FieldRule::required("dueDate").datetime(),
            FieldRule::optional("paidDate").datetime(),
            FieldRule::optional("paymentMethod").one_of(PaymentMethod::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::required("isRecurring").boolean(),
            FieldRule::optional("recurringFrequency").one_of(RecurringFrequency::VALUES),
            FieldRule::optional("nextDueDate").datetime(),
            FieldRule::required("priority").one_of(Priority::VALUES),
            FieldRule::optional("tags").text_array(),
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
        "tax_record.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("year").int_range(MIN_YEAR, MAX_YEAR),
            FieldRule::required("amount").positive(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::optional("taxType").one_of(TaxType::VALUES),
            FieldRule::optional("status").one_of(TaxStatus::VALUES),
            FieldRule::required("dueDate").datetime(),
            FieldRule::optional("paymentMethod").one_of(PaymentMethod::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("isRecurring").boolean(),
            FieldRule::optional("recurringFrequency").one_of(RecurringFrequency::VALUES),
            FieldRule::optional("nextDueDate").datetime(),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::optional("tags").text_array(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "tax_record.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("amount").positive(),
            FieldRule::optional("percentage").range(0.0, 100.0),
            FieldRule::optional("status").one_of(TaxStatus::VALUES),
            FieldRule::optional("paid").boolean(),
            FieldRule::optional("paidAmount").at_least(0.0),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidDate").datetime(),
            FieldRule::optional("paymentMethod").one_of(PaymentMethod::VALUES),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("isRecurring").boolean(),
            FieldRule::optional("recurringFrequency").one_of(RecurringFrequency::VALUES),
            FieldRule::optional("nextDueDate").datetime(),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::optional("tags").text_array(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("year").int_range(MIN_YEAR, MAX_YEAR),
        FieldRule::optional("status").one_of(TaxStatus::VALUES),
        FieldRule::optional("taxType").one_of(TaxType::VALUES),
        FieldRule::optional("paid").boolean(),
        FieldRule::optional("isRecurring").boolean(),
        FieldRule::optional("priority").one_of(Priority::VALUES),
        FieldRule::optional("paymentMethod").one_of(PaymentMethod::VALUES),
        FieldRule::optional("currencyId").id(),
        FieldRule::optional("amountMin").at_least(0.0),
        FieldRule::optional("amountMax").at_least(0.0),
        FieldRule::optional("dueDateFrom").datetime(),
        FieldRule::optional("dueDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(TaxRecordSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("tax_record.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<TaxRecord, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `taxType` defaults to `PROPERTY_TAX` and
/// `status` to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateTaxRecord, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateTaxRecord, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<TaxRecordFilter, ValidationError> {
    let filter: TaxRecordFilter = filter_shape().validate(payload)?;
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
            "year": 2024,
            "amount": 1800.0,
            "dueDate": "2024-04-30T00:00:00Z",
        })
    }

    #[test]
    fn minimal_create_applies_defaults() {
        let input = validate_create(&minimal_create()).unwrap();
        assert_eq!(input.tax_type, TaxType::PropertyTax);
        assert_eq!(input.status, TaxStatus::Pending);
        assert_eq!(input.priority, Priority::Medium);
        assert!(input.tags.is_empty());
    }

    #[test]
    fn year_is_bounded() {
        let mut payload = minimal_create();
        payload["year"] = json!(1999);
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["year"]);
        payload["year"] = json!(2101);
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["year"]);
    }

    #[test]
    fn tags_must_be_strings() {
        let mut payload = minimal_create();
        payload["tags"] = json!(["municipal", 7]);
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["tags[1]"]);
    }
}
