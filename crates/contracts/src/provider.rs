//! Service provider entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;

const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Trade the provider covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ProviderServiceType {
    Cleaning,
    Maintenance,
    Security,
    Landscaping,
    Utilities,
    Other,
}

impl ProviderServiceType {
    pub const VALUES: &'static [&'static str] = &[
        "CLEANING",
        "MAINTENANCE",
        "SECURITY",
        "LANDSCAPING",
        "UTILITIES",
        "OTHER",
    ];
}

/// Sort keys accepted by the provider list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ProviderSortKey {
    Name,
    Rating,
    CreatedAt,
}

impl ProviderSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "rating", "createdAt"];
}

/// A fully-formed provider record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Provider {
    pub id: EntityId,
    pub name: String,
    pub service_type: ProviderServiceType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub agency_id: Option<EntityId>,
    pub rating: Option<f64>,
    pub is_preferred: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateProvider {
    pub name: String,
    pub service_type: ProviderServiceType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub agency_id: Option<EntityId>,
    #[serde(default)]
    pub is_preferred: bool,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProvider {
    pub id: EntityId,
    pub name: Option<String>,
    pub service_type: Option<ProviderServiceType>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub agency_id: Option<EntityId>,
    pub rating: Option<f64>,
    pub is_preferred: Option<bool>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProviderFilter {
    pub search: Option<String>,
    pub service_type: Option<ProviderServiceType>,
    pub agency_id: Option<EntityId>,
    pub is_preferred: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_by: Option<ProviderSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "provider",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("serviceType").one_of(ProviderServiceType::VALUES),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("rating").range(0.0, 5.0),
            FieldRule::required("isPreferred").boolean(),
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
        "provider.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("serviceType").one_of(ProviderServiceType::VALUES),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("isPreferred").boolean(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "provider.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("serviceType").one_of(ProviderServiceType::VALUES),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("rating").range(0.0, 5.0),
            FieldRule::optional("isPreferred").boolean(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("serviceType").one_of(ProviderServiceType::VALUES),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("isPreferred").boolean(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sortBy").one_of(ProviderSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("provider.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Provider, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateProvider, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateProvider, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ProviderFilter, ValidationError> {
    filter_shape().validate(payload)
}
