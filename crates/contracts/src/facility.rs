//! Facility (building/complex) entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Amenities offered at the facility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum FacilityAmenity {
    CommunityCenter,
    CoWorkingSpace,
    BikeStorage,
    ParkingGarage,
    EvCharging,
    SecurityDesk,
    PackageRoom,
    BbqArea,
    RooftopTerrace,
}

impl FacilityAmenity {
    pub const VALUES: &'static [&'static str] = &[
        "COMMUNITY_CENTER",
        "CO_WORKING_SPACE",
        "BIKE_STORAGE",
        "PARKING_GARAGE",
        "EV_CHARGING",
        "SECURITY_DESK",
        "PACKAGE_ROOM",
        "BBQ_AREA",
        "ROOFTOP_TERRACE",
    ];
}

/// Sort keys accepted by the facility list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum FacilitySortKey {
    Name,
    CreatedAt,
}

impl FacilitySortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt"];
}

/// A fully-formed facility record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Facility {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<FacilityAmenity>,
    pub location_id: Option<EntityId>,
    pub manager_id: Option<EntityId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateFacility {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<FacilityAmenity>,
    pub location_id: Option<EntityId>,
    pub manager_id: Option<EntityId>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateFacility {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub amenities: Option<Vec<FacilityAmenity>>,
    pub location_id: Option<EntityId>,
    pub manager_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FacilityFilter {
    pub search: Option<String>,
    pub location_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub sort_by: Option<FacilitySortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "facility",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("amenities").enum_array(FacilityAmenity::VALUES),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("managerId").id(),
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
        "facility.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("amenities").enum_array(FacilityAmenity::VALUES),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("managerId").id(),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "facility.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("amenities").enum_array(FacilityAmenity::VALUES),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("managerId").id(),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("locationId").id(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sortBy").one_of(FacilitySortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("facility.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Facility, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateFacility, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateFacility, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<FacilityFilter, ValidationError> {
    filter_shape().validate(payload)
}
