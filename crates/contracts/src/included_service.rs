//! Included service entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Kind of service bundled into a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ServiceType {
    Cleaning,
    Laundry,
    Breakfast,
    Parking,
    Wifi,
    AirportTransfer,
}

impl ServiceType {
    pub const VALUES: &'static [&'static str] = &[
        "CLEANING",
        "LAUNDRY",
        "BREAKFAST",
        "PARKING",
        "WIFI",
        "AIRPORT_TRANSFER",
    ];
}

/// How often a recurring service is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ServiceFrequency {
    Daily,
    Weekly,
    OnRequest,
}

impl ServiceFrequency {
    pub const VALUES: &'static [&'static str] = &["DAILY", "WEEKLY", "ON_REQUEST"];
}

/// Sort keys accepted by the included service list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum IncludedServiceSortKey {
    Name,
    CreatedAt,
}

impl IncludedServiceSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt"];
}

/// A fully-formed included service record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IncludedService {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub frequency: Option<ServiceFrequency>,
    pub property_id: Option<EntityId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an included service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateIncludedService {
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub frequency: Option<ServiceFrequency>,
    pub property_id: Option<EntityId>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateIncludedService {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
    pub frequency: Option<ServiceFrequency>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct IncludedServiceFilter {
    pub search: Option<String>,
    pub service_type: Option<ServiceType>,
    pub property_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub sort_by: Option<IncludedServiceSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "included_service",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("serviceType").one_of(ServiceType::VALUES),
            FieldRule::optional("frequency").one_of(ServiceFrequency::VALUES),
            FieldRule::optional("propertyId").id(),
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
        "included_service.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("serviceType").one_of(ServiceType::VALUES),
            FieldRule::optional("frequency").one_of(ServiceFrequency::VALUES),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "included_service.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("serviceType").one_of(ServiceType::VALUES),
            FieldRule::optional("frequency").one_of(ServiceFrequency::VALUES),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("serviceType").one_of(ServiceType::VALUES),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sortBy").one_of(IncludedServiceSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("included_service.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<IncludedService, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateIncludedService, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateIncludedService, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<IncludedServiceFilter, ValidationError> {
    filter_shape().validate(payload)
}
