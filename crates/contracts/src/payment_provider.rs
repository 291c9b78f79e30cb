//! Payment provider entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;

/// Machine identifier for a provider (`stripe`, `bank_transfer_eu`).
const CODE_PATTERN: &str = r"^[a-z0-9_-]{2,40}$";

/// Category of payment rail the provider offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ProviderType {
    Card,
    Bank,
    Wallet,
    Crypto,
    Other,
}

impl ProviderType {
    pub const VALUES: &'static [&'static str] = &["CARD", "BANK", "WALLET", "CRYPTO", "OTHER"];
}

/// Sort keys accepted by the payment provider list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PaymentProviderSortKey {
    Name,
    CreatedAt,
}

impl PaymentProviderSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt"];
}

/// A fully-formed payment provider record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentProvider {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    pub provider_type: ProviderType,
    pub api_base_url: Option<String>,
    /// Processing fee, percent of the charged amount.
    pub fee_percentage: Option<f64>,
    pub supported_currency_ids: Option<Vec<EntityId>>,
    pub sandbox: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a payment provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePaymentProvider {
    pub name: String,
    pub code: String,
    pub provider_type: ProviderType,
    pub api_base_url: Option<String>,
    pub fee_percentage: Option<f64>,
    pub supported_currency_ids: Option<Vec<EntityId>>,
    #[serde(default)]
    pub sandbox: bool,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePaymentProvider {
    pub id: EntityId,
    pub name: Option<String>,
    pub provider_type: Option<ProviderType>,
    pub api_base_url: Option<String>,
    pub fee_percentage: Option<f64>,
    pub supported_currency_ids: Option<Vec<EntityId>>,
    pub sandbox: Option<bool>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentProviderFilter {
    pub search: Option<String>,
    pub provider_type: Option<ProviderType>,
    pub is_active: Option<bool>,
    pub sandbox: Option<bool>,
    pub sort_by: Option<PaymentProviderSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "payment_provider",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("providerType").one_of(ProviderType::VALUES),
            FieldRule::optional("apiBaseUrl").url(),
            FieldRule::optional("feePercentage").range(0.0, 100.0),
            FieldRule::optional("supportedCurrencyIds").id_array(),
            FieldRule::required("sandbox").boolean(),
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
        "payment_provider.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("providerType").one_of(ProviderType::VALUES),
            FieldRule::optional("apiBaseUrl").url(),
            FieldRule::optional("feePercentage").range(0.0, 100.0),
            FieldRule::optional("supportedCurrencyIds").id_array(),
            FieldRule::optional("sandbox").boolean(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "payment_provider.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("providerType").one_of(ProviderType::VALUES),
            FieldRule::optional("apiBaseUrl").url(),
            FieldRule::optional("feePercentage").range(0.0, 100.0),
            FieldRule::optional("supportedCurrencyIds").id_array(),
            FieldRule::optional("sandbox").boolean(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("providerType").one_of(ProviderType::VALUES),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sandbox").boolean(),
        FieldRule::optional("sortBy").one_of(PaymentProviderSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("payment_provider.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<PaymentProvider, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreatePaymentProvider, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; the immutable `code` is not updatable.
pub fn validate_update(payload: &Value) -> Result<UpdatePaymentProvider, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<PaymentProviderFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_must_be_machine_friendly() {
        let err = validate_create(&json!({
            "name": "Stripe",
            "code": "Stripe Inc!",
            "providerType": "CARD",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
    }
}
