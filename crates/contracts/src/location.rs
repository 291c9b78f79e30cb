//! Location entity contracts.
//!
//! Locations are leaf records eagerly embedded by property shapes, so this
//! module also exposes crate-internal check functions for that delegation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_ADDRESS_LEN: usize = 300;
pub const MAX_CITY_LEN: usize = 120;
pub const MAX_POSTAL_CODE_LEN: usize = 20;

/// Sort keys accepted by the location list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum LocationSortKey {
    City,
    Country,
    CreatedAt,
}

impl LocationSortKey {
    pub const VALUES: &'static [&'static str] = &["city", "country", "createdAt"];
}

/// A fully-formed location record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Location {
    pub id: EntityId,
    pub address: String,
    pub city: String,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateLocation {
    pub address: String,
    pub city: String,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateLocation {
    pub id: EntityId,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LocationFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub sort_by: Option<LocationSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "location",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("address").text_bounded(1, MAX_ADDRESS_LEN),
            FieldRule::required("city").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("district").text(MAX_CITY_LEN),
            FieldRule::optional("postalCode").text(MAX_POSTAL_CODE_LEN),
            FieldRule::required("country").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("latitude").range(-90.0, 90.0),
            FieldRule::optional("longitude").range(-180.0, 180.0),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "location.create",
        vec![
            FieldRule::required("address").text_bounded(1, MAX_ADDRESS_LEN),
            FieldRule::required("city").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("district").text(MAX_CITY_LEN),
            FieldRule::optional("postalCode").text(MAX_POSTAL_CODE_LEN),
            FieldRule::required("country").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("latitude").range(-90.0, 90.0),
            FieldRule::optional("longitude").range(-180.0, 180.0),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "location.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("address").text_bounded(1, MAX_ADDRESS_LEN),
            FieldRule::optional("city").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("district").text(MAX_CITY_LEN),
            FieldRule::optional("postalCode").text(MAX_POSTAL_CODE_LEN),
            FieldRule::optional("country").text_bounded(1, MAX_CITY_LEN),
            FieldRule::optional("latitude").range(-90.0, 90.0),
            FieldRule::optional("longitude").range(-180.0, 180.0),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("city").text(MAX_CITY_LEN),
        FieldRule::optional("district").text(MAX_CITY_LEN),
        FieldRule::optional("country").text(MAX_CITY_LEN),
        FieldRule::optional("sortBy").one_of(LocationSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("location.filter", rules)
}

/// Check used when a location is embedded in another entity's canonical
/// shape; violations come back unprefixed for the caller to path-qualify.
pub(crate) fn canonical_check(payload: &Value) -> Vec<FieldViolation> {
    canonical_shape().check(payload)
}

/// Check used when a location is created inline with its parent.
pub(crate) fn create_check(payload: &Value) -> Vec<FieldViolation> {
    create_shape().check(payload)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Location, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateLocation, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateLocation, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<LocationFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn latitude_outside_range_is_rejected() {
        let err = validate_create(&json!({
            "address": "1 Harbour Way",
            "city": "Lisbon",
            "country": "Portugal",
            "latitude": 91.2,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["latitude"]);
    }

    #[test]
    fn create_requires_address_city_country() {
        let err = validate_create(&json!({})).unwrap_err();
        assert_eq!(err.fields(), vec!["address", "city", "country"]);
    }
}
