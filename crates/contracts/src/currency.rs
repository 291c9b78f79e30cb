//! Currency entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 80;
pub const MAX_SYMBOL_LEN: usize = 8;

/// ISO 4217 alpha code.
const CODE_PATTERN: &str = r"^[A-Z]{3}$";

fn default_exchange_rate() -> f64 {
    1.0
}

fn default_decimal_places() -> i64 {
    2
}

/// Sort keys accepted by the currency list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CurrencySortKey {
    Code,
    Name,
}

impl CurrencySortKey {
    pub const VALUES: &'static [&'static str] = &["code", "name"];
}

/// A fully-formed currency record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Currency {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub symbol: String,
    /// Rate against the platform's base currency.
    pub exchange_rate: f64,
    pub decimal_places: i64,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCurrency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: i64,
    #[serde(default)]
    pub is_default: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCurrency {
    pub id: EntityId,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub exchange_rate: Option<f64>,
    pub decimal_places: Option<i64>,
    pub is_default: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyFilter {
    pub search: Option<String>,
    pub is_default: Option<bool>,
    pub sort_by: Option<CurrencySortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "currency",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("symbol").text_bounded(1, MAX_SYMBOL_LEN),
            FieldRule::required("exchangeRate").positive(),
            FieldRule::required("decimalPlaces").int_range(0, 6),
            FieldRule::required("isDefault").boolean(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "currency.create",
        vec![
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("symbol").text_bounded(1, MAX_SYMBOL_LEN),
            FieldRule::optional("exchangeRate").positive(),
            FieldRule::optional("decimalPlaces").int_range(0, 6),
            FieldRule::optional("isDefault").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "currency.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("symbol").text_bounded(1, MAX_SYMBOL_LEN),
            FieldRule::optional("exchangeRate").positive(),
            FieldRule::optional("decimalPlaces").int_range(0, 6),
            FieldRule::optional("isDefault").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("isDefault").boolean(),
        FieldRule::optional("sortBy").one_of(CurrencySortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("currency.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Currency, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; the exchange rate defaults to 1.
pub fn validate_create(payload: &Value) -> Result<CreateCurrency, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; the immutable `code` is not updatable.
pub fn validate_update(payload: &Value) -> Result<UpdateCurrency, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<CurrencyFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_must_be_three_uppercase_letters() {
        assert!(validate_create(&json!({"code": "EUR", "name": "Euro", "symbol": "€"})).is_ok());
        let err =
            validate_create(&json!({"code": "eur", "name": "Euro", "symbol": "€"})).unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
    }

    #[test]
    fn update_cannot_touch_the_code() {
        let err = validate_update(&json!({"id": "cur1", "code": "USD"})).unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
    }
}
