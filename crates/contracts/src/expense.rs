//! Expense entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NOTES_LEN: usize = 1000;

/// Category of property expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ExpenseType {
    Maintenance,
    Cleaning,
    Utilities,
    ManagementFee,
    Tax,
    Insurance,
    Repair,
    Security,
    Other,
}

impl ExpenseType {
    pub const VALUES: &'static [&'static str] = &[
        "MAINTENANCE",
        "CLEANING",
        "UTILITIES",
        "MANAGEMENT_FEE",
        "TAX",
        "INSURANCE",
        "REPAIR",
        "SECURITY",
        "OTHER",
    ];
}

/// Settlement state of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ExpenseStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl ExpenseStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "PAID", "OVERDUE", "CANCELLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for ExpenseStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the expense list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ExpenseSortKey {
    Amount,
    DueDate,
    PaidDate,
    CreatedAt,
}

impl ExpenseSortKey {
    pub const VALUES: &'static [&'static str] = &["amount", "dueDate", "paidDate", "createdAt"];
}

/// A fully-formed expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: EntityId,
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub currency_id: EntityId,
    pub status: ExpenseStatus,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub facility_id: Option<EntityId>,
    pub included_service_id: Option<EntityId>,
    pub extra_charge_id: Option<EntityId>,
    pub due_date: Option<Timestamp>,
    pub paid_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateExpense {
    pub expense_type: ExpenseType,
    pub amount: f64,
    pub currency_id: EntityId,
    #[serde(default)]
    pub status: ExpenseStatus,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub facility_id: Option<EntityId>,
    pub included_service_id: Option<EntityId>,
    pub extra_charge_id: Option<EntityId>,
    pub due_date: Option<Timestamp>,
    pub paid_date: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateExpense {
    pub id: EntityId,
    pub expense_type: Option<ExpenseType>,
    pub amount: Option<f64>,
    pub currency_id: Option<EntityId>,
    pub status: Option<ExpenseStatus>,
    pub due_date: Option<Timestamp>,
    pub paid_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExpenseFilter {
    pub expense_type: Option<ExpenseType>,
    pub status: Option<ExpenseStatus>,
    pub property_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub currency_id: Option<EntityId>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub due_date_from: Option<Timestamp>,
    pub due_date_to: Option<Timestamp>,
    pub paid_date_from: Option<Timestamp>,
    pub paid_date_to: Option<Timestamp>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<ExpenseSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "expense",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("expenseType").one_of(ExpenseType::VALUES),
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::required("status").one_of(ExpenseStatus::VALUES),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("facilityId").id(),
            FieldRule::optional("includedServiceId").id(),
            FieldRule::optional("extraChargeId").id(),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidDate").datetime(),
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
        "expense.create",
        vec![
            FieldRule::required("expenseType").one_of(ExpenseType::VALUES),
            FieldRule::required("amount").positive(),
            FieldRule::required("currencyId").id(),
            FieldRule::optional("status").one_of(ExpenseStatus::VALUES),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("facilityId").id(),
            FieldRule::optional("includedServiceId").id(),
            FieldRule::optional("extraChargeId").id(),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidDate").datetime(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "expense.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("expenseType").one_of(ExpenseType::VALUES),
            FieldRule::optional("amount").positive(),
            FieldRule::optional("currencyId").id(),
            FieldRule::optional("status").one_of(ExpenseStatus::VALUES),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("paidDate").datetime(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("expenseType").one_of(ExpenseType::VALUES),
        FieldRule::optional("status").one_of(ExpenseStatus::VALUES),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("currencyId").id(),
        FieldRule::optional("amountMin").at_least(0.0),
        FieldRule::optional("amountMax").at_least(0.0),
        FieldRule::optional("dueDateFrom").datetime(),
        FieldRule::optional("dueDateTo").datetime(),
        FieldRule::optional("paidDateFrom").datetime(),
        FieldRule::optional("paidDateTo").datetime(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(ExpenseSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("expense.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Expense, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateExpense, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateExpense, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ExpenseFilter, ValidationError> {
    let filter: ExpenseFilter = filter_shape().validate(payload)?;
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
        "paidDateFrom",
        filter.paid_date_from,
        "paidDateTo",
        filter.paid_date_to,
    );
    common::check_date_range(
        &mut violations,
        "createdAtFrom",
        filter.created_at_from,
        "createdAtTo",
        filter.created_at_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_create_defaults_status() {
        let input = validate_create(&json!({
            "expenseType": "CLEANING",
            "amount": 85.0,
            "currencyId": "cur_eur",
        }))
        .unwrap();
        assert_eq!(input.status, ExpenseStatus::Pending);
    }
}
