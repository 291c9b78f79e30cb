//! Property entity contracts.
//!
//! The widest shape in the catalog. Eagerly-loaded `location` and `photos`
//! expansions are validated against those entities' own canonical shapes
//! (violations come back with dotted paths like `location.city`); every
//! other relation is identifier-only.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};
use crate::location::{self, CreateLocation, Location};
use crate::photo::{self, Photo};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

pub const MIN_YEAR_BUILT: i64 = 1800;
pub const MAX_YEAR_BUILT: i64 = 2100;

/// Loose phone format: optional leading `+`, digits and common separators.
const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Kind of dwelling or premises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Duplex,
    Penthouse,
    Studio,
    Townhouse,
    Loft,
    Cottage,
    Office,
    Shop,
    Warehouse,
}

impl PropertyType {
    pub const VALUES: &'static [&'static str] = &[
        "APARTMENT",
        "HOUSE",
        "VILLA",
        "DUPLEX",
        "PENTHOUSE",
        "STUDIO",
        "TOWNHOUSE",
        "LOFT",
        "COTTAGE",
        "OFFICE",
        "SHOP",
        "WAREHOUSE",
    ];
}

/// Market state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyStatus {
    Available,
    UnderContract,
    Sold,
    Rented,
    PendingApproval,
    OffMarket,
    Maintenance,
    Foreclosure,
}

impl PropertyStatus {
    pub const VALUES: &'static [&'static str] = &[
        "AVAILABLE",
        "UNDER_CONTRACT",
        "SOLD",
        "RENTED",
        "PENDING_APPROVAL",
        "OFF_MARKET",
        "MAINTENANCE",
        "FORECLOSURE",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::UnderContract => "UNDER_CONTRACT",
            Self::Sold => "SOLD",
            Self::Rented => "RENTED",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::OffMarket => "OFF_MARKET",
            Self::Maintenance => "MAINTENANCE",
            Self::Foreclosure => "FORECLOSURE",
        }
    }
}

impl Default for PropertyStatus {
    fn default() -> Self {
        Self::PendingApproval
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Land,
    Industrial,
    Other,
}

impl PropertyCategory {
    pub const VALUES: &'static [&'static str] =
        &["RESIDENTIAL", "COMMERCIAL", "LAND", "INDUSTRIAL", "OTHER"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyCondition {
    Excellent,
    Good,
    Fair,
    NeedsRenovation,
    UnderConstruction,
}

impl PropertyCondition {
    pub const VALUES: &'static [&'static str] = &[
        "EXCELLENT",
        "GOOD",
        "FAIR",
        "NEEDS_RENOVATION",
        "UNDER_CONSTRUCTION",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ListingType {
    Sale,
    Rent,
    Booking,
}

impl ListingType {
    pub const VALUES: &'static [&'static str] = &["SALE", "RENT", "BOOKING"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum OwnershipType {
    Freehold,
    Leasehold,
    Commonhold,
    Cooperative,
    Timeshare,
    Fractional,
}

impl OwnershipType {
    pub const VALUES: &'static [&'static str] = &[
        "FREEHOLD",
        "LEASEHOLD",
        "COMMONHOLD",
        "COOPERATIVE",
        "TIMESHARE",
        "FRACTIONAL",
    ];
}

/// Structural features of the unit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyFeature {
    Furnished,
    PartiallyFurnished,
    Unfurnished,
    OpenFloorPlan,
    HighCeiling,
    Balcony,
    Terrace,
    Garden,
    SeaView,
    MountainView,
    CityView,
    SmartHome,
    EnergyEfficient,
    HomeOffice,
}

impl PropertyFeature {
    pub const VALUES: &'static [&'static str] = &[
        "FURNISHED",
        "PARTIALLY_FURNISHED",
        "UNFURNISHED",
        "OPEN_FLOOR_PLAN",
        "HIGH_CEILING",
        "BALCONY",
        "TERRACE",
        "GARDEN",
        "SEA_VIEW",
        "MOUNTAIN_VIEW",
        "CITY_VIEW",
        "SMART_HOME",
        "ENERGY_EFFICIENT",
        "HOME_OFFICE",
    ];
}

/// Shared building or complex amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PropertyAmenity {
    Pool,
    Gym,
    Garden,
    Parking,
    Security,
    Elevator,
    Storage,
    AirConditioning,
    Heating,
    Wifi,
    Sauna,
    Fireplace,
    PetFriendly,
    WheelchairAccess,
    Laundry,
    Concierge,
}

impl PropertyAmenity {
    pub const VALUES: &'static [&'static str] = &[
        "POOL",
        "GYM",
        "GARDEN",
        "PARKING",
        "SECURITY",
        "ELEVATOR",
        "STORAGE",
        "AIR_CONDITIONING",
        "HEATING",
        "WIFI",
        "SAUNA",
        "FIREPLACE",
        "PET_FRIENDLY",
        "WHEELCHAIR_ACCESS",
        "LAUNDRY",
        "CONCIERGE",
    ];
}

/// Preferred way to reach the listing contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ContactMethod {
    Email,
    Phone,
    Message,
    Any,
}

impl ContactMethod {
    pub const VALUES: &'static [&'static str] = &["EMAIL", "PHONE", "MESSAGE", "ANY"];
}

/// Sort keys accepted by the property list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PropertySortKey {
    CreatedAt,
    UpdatedAt,
    MarketValue,
    Size,
}

impl PropertySortKey {
    pub const VALUES: &'static [&'static str] = &["createdAt", "updatedAt", "marketValue", "size"];
}

/// A fully-formed property record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Property {
    // Identification
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub property_status: PropertyStatus,
    pub category: PropertyCategory,
    pub condition: Option<PropertyCondition>,
    pub listing_type: Option<ListingType>,

    // Physical characteristics
    /// Floor area in square metres.
    pub size: f64,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub floors: Option<i64>,
    pub year_built: Option<i64>,
    #[serde(default)]
    pub features: Vec<PropertyFeature>,
    #[serde(default)]
    pub amenities: Vec<PropertyAmenity>,

    // Ownership & financial
    pub ownership_type: Option<OwnershipType>,
    pub market_value: Option<f64>,
    pub tax_value: Option<f64>,
    pub insurance_value: Option<f64>,
    pub mortgage_eligible: bool,

    // Location (normalized id plus optional eager expansion)
    pub location_id: Option<EntityId>,
    pub location: Option<Location>,
    pub photos: Option<Vec<Photo>>,

    // Relationships
    pub agent_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,

    // Contact
    pub contact_method: Option<ContactMethod>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    pub is_active: bool,
    pub featured: bool,
    pub average_rating: Option<f64>,

    // Metadata
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateProperty {
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    #[serde(default)]
    pub property_status: PropertyStatus,
    pub category: PropertyCategory,
    pub condition: Option<PropertyCondition>,
    pub listing_type: Option<ListingType>,
    pub size: f64,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub floors: Option<i64>,
    pub year_built: Option<i64>,
    #[serde(default)]
    pub features: Vec<PropertyFeature>,
    #[serde(default)]
    pub amenities: Vec<PropertyAmenity>,
    pub ownership_type: Option<OwnershipType>,
    pub market_value: Option<f64>,
    pub tax_value: Option<f64>,
    pub insurance_value: Option<f64>,
    #[serde(default)]
    pub mortgage_eligible: bool,
    pub location_id: Option<EntityId>,
    /// Create the location inline instead of referencing one.
    pub location: Option<CreateLocation>,
    /// Photo URLs to attach; photo records are created by the server.
    pub photos: Option<Vec<String>>,
    pub agent_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub contact_method: Option<ContactMethod>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateProperty {
    pub id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub property_status: Option<PropertyStatus>,
    pub category: Option<PropertyCategory>,
    pub condition: Option<PropertyCondition>,
    pub listing_type: Option<ListingType>,
    pub size: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub floors: Option<i64>,
    pub year_built: Option<i64>,
    pub features: Option<Vec<PropertyFeature>>,
    pub amenities: Option<Vec<PropertyAmenity>>,
    pub ownership_type: Option<OwnershipType>,
    pub market_value: Option<f64>,
    pub tax_value: Option<f64>,
    pub insurance_value: Option<f64>,
    pub mortgage_eligible: Option<bool>,
    pub location_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub contact_method: Option<ContactMethod>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: Option<bool>,
    pub featured: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PropertyFilter {
    pub search: Option<String>,
    pub property_type: Option<PropertyType>,
    pub property_status: Option<PropertyStatus>,
    pub category: Option<PropertyCategory>,
    pub condition: Option<PropertyCondition>,
    pub listing_type: Option<ListingType>,
    pub features: Option<Vec<PropertyFeature>>,
    pub amenities: Option<Vec<PropertyAmenity>>,
    pub location_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub owner_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    pub bedrooms_min: Option<i64>,
    pub bedrooms_max: Option<i64>,
    pub year_built_min: Option<i64>,
    pub year_built_max: Option<i64>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<PropertySortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "property",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("propertyType").one_of(PropertyType::VALUES),
            FieldRule::required("propertyStatus").one_of(PropertyStatus::VALUES),
            FieldRule::required("category").one_of(PropertyCategory::VALUES),
            FieldRule::optional("condition").one_of(PropertyCondition::VALUES),
            FieldRule::optional("listingType").one_of(ListingType::VALUES),
            FieldRule::required("size").positive(),
            FieldRule::optional("bedrooms").int_at_least(0),
            FieldRule::optional("bathrooms").int_at_least(0),
            FieldRule::optional("floors").int_at_least(0),
            FieldRule::optional("yearBuilt").int_range(MIN_YEAR_BUILT, MAX_YEAR_BUILT),
            FieldRule::optional("features").enum_array(PropertyFeature::VALUES),
            FieldRule::optional("amenities").enum_array(PropertyAmenity::VALUES),
            FieldRule::optional("ownershipType").one_of(OwnershipType::VALUES),
            FieldRule::optional("marketValue").at_least(0.0),
            FieldRule::optional("taxValue").at_least(0.0),
            FieldRule::optional("insuranceValue").at_least(0.0),
            FieldRule::required("mortgageEligible").boolean(),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("location").nested(location::canonical_check),
            FieldRule::optional("photos").nested_array(photo::canonical_check),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("ownerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("contactMethod").one_of(ContactMethod::VALUES),
            FieldRule::optional("contactEmail").email(),
            FieldRule::optional("contactPhone").pattern(PHONE_PATTERN),
            FieldRule::required("isActive").boolean(),
            FieldRule::required("featured").boolean(),
            FieldRule::optional("averageRating").range(0.0, 5.0),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "property.create",
        vec![
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("propertyType").one_of(PropertyType::VALUES),
            FieldRule::optional("propertyStatus").one_of(PropertyStatus::VALUES),
            FieldRule::required("category").one_of(PropertyCategory::VALUES),
            FieldRule::optional("condition").one_of(PropertyCondition::VALUES),
            FieldRule::optional("listingType").one_of(ListingType::VALUES),
            FieldRule::required("size").positive(),
            FieldRule::optional("bedrooms").int_at_least(0),
            FieldRule::optional("bathrooms").int_at_least(0),
            FieldRule::optional("floors").int_at_least(0),
            FieldRule::optional("yearBuilt").int_range(MIN_YEAR_BUILT, MAX_YEAR_BUILT),
            FieldRule::optional("features").enum_array(PropertyFeature::VALUES),
            FieldRule::optional("amenities").enum_array(PropertyAmenity::VALUES),
            FieldRule::optional("ownershipType").one_of(OwnershipType::VALUES),
            FieldRule::optional("marketValue").at_least(0.0),
            FieldRule::optional("taxValue").at_least(0.0),
            FieldRule::optional("insuranceValue").at_least(0.0),
            FieldRule::optional("mortgageEligible").boolean(),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("location").nested(location::create_check),
            FieldRule::optional("photos").text_array(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("ownerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("contactMethod").one_of(ContactMethod::VALUES),
            FieldRule::optional("contactEmail").email(),
            FieldRule::optional("contactPhone").pattern(PHONE_PATTERN),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("featured").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "property.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("propertyType").one_of(PropertyType::VALUES),
            FieldRule::optional("propertyStatus").one_of(PropertyStatus::VALUES),
            FieldRule::optional("category").one_of(PropertyCategory::VALUES),
            FieldRule::optional("condition").one_of(PropertyCondition::VALUES),
            FieldRule::optional("listingType").one_of(ListingType::VALUES),
            FieldRule::optional("size").positive(),
            FieldRule::optional("bedrooms").int_at_least(0),
            FieldRule::optional("bathrooms").int_at_least(0),
            FieldRule::optional("floors").int_at_least(0),
            FieldRule::optional("yearBuilt").int_range(MIN_YEAR_BUILT, MAX_YEAR_BUILT),
            FieldRule::optional("features").enum_array(PropertyFeature::VALUES),
            FieldRule::optional("amenities").enum_array(PropertyAmenity::VALUES),
            FieldRule::optional("ownershipType").one_of(OwnershipType::VALUES),
            FieldRule::optional("marketValue").at_least(0.0),
            FieldRule::optional("taxValue").at_least(0.0),
            FieldRule::optional("insuranceValue").at_least(0.0),
            FieldRule::optional("mortgageEligible").boolean(),
            FieldRule::optional("locationId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("ownerId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("contactMethod").one_of(ContactMethod::VALUES),
            FieldRule::optional("contactEmail").email(),
            FieldRule::optional("contactPhone").pattern(PHONE_PATTERN),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("featured").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("propertyType").one_of(PropertyType::VALUES),
        FieldRule::optional("propertyStatus").one_of(PropertyStatus::VALUES),
        FieldRule::optional("category").one_of(PropertyCategory::VALUES),
        FieldRule::optional("condition").one_of(PropertyCondition::VALUES),
        FieldRule::optional("listingType").one_of(ListingType::VALUES),
        FieldRule::optional("features").enum_array(PropertyFeature::VALUES),
        FieldRule::optional("amenities").enum_array(PropertyAmenity::VALUES),
        FieldRule::optional("locationId").id(),
        FieldRule::optional("agentId").id(),
        FieldRule::optional("ownerId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("featured").boolean(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("priceMin").at_least(0.0),
        FieldRule::optional("priceMax").at_least(0.0),
        FieldRule::optional("sizeMin").at_least(0.0),
        FieldRule::optional("sizeMax").at_least(0.0),
        FieldRule::optional("bedroomsMin").int_at_least(0),
        FieldRule::optional("bedroomsMax").int_at_least(0),
        FieldRule::optional("yearBuiltMin").int_range(MIN_YEAR_BUILT, MAX_YEAR_BUILT),
        FieldRule::optional("yearBuiltMax").int_range(MIN_YEAR_BUILT, MAX_YEAR_BUILT),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(PropertySortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("property.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Property, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `propertyStatus` defaults to
/// `PENDING_APPROVAL` and an inline `location` is validated as a
/// location-create payload.
pub fn validate_create(payload: &Value) -> Result<CreateProperty, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateProperty, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<PropertyFilter, ValidationError> {
    let filter: PropertyFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_numeric_range(
        &mut violations,
        "priceMin",
        filter.price_min,
        "priceMax",
        filter.price_max,
    );
    common::check_numeric_range(
        &mut violations,
        "sizeMin",
        filter.size_min,
        "sizeMax",
        filter.size_max,
    );
    common::check_numeric_range(
        &mut violations,
        "bedroomsMin",
        filter.bedrooms_min.map(|n| n as f64),
        "bedroomsMax",
        filter.bedrooms_max.map(|n| n as f64),
    );
    common::check_numeric_range(
        &mut violations,
        "yearBuiltMin",
        filter.year_built_min.map(|n| n as f64),
        "yearBuiltMax",
        filter.year_built_max.map(|n| n as f64),
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

    fn minimal_create() -> Value {
        json!({
            "title": "Sunny two-bedroom near the harbour",
            "propertyType": "APARTMENT",
            "category": "RESIDENTIAL",
            "size": 74.5,
        })
    }

    #[test]
    fn minimal_create_applies_defaults() {
        let input = validate_create(&minimal_create()).unwrap();
        assert_eq!(input.property_status, PropertyStatus::PendingApproval);
        assert!(input.features.is_empty());
        assert!(input.is_active);
        assert!(!input.featured);
    }

    #[test]
    fn inline_location_is_validated_with_dotted_paths() {
        let mut payload = minimal_create();
        payload["location"] = json!({"address": "1 Harbour Way", "city": "Lisbon"});
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["location.country"]);
    }

    #[test]
    fn amenity_outside_set_reports_the_index() {
        let mut payload = minimal_create();
        payload["amenities"] = json!(["POOL", "HELIPAD"]);
        let err = validate_create(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["amenities[1]"]);
    }

    #[test]
    fn canonical_validates_embedded_photos() {
        let payload = json!({
            "id": "p1",
            "title": "Sunny two-bedroom",
            "propertyType": "APARTMENT",
            "propertyStatus": "AVAILABLE",
            "category": "RESIDENTIAL",
            "size": 74.5,
            "mortgageEligible": false,
            "isActive": true,
            "featured": false,
            "photos": [{"id": "ph1", "url": "nope", "isCover": true, "sortIndex": 0,
                        "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"}],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        });
        let err = validate_canonical(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["photos[0].url"]);
    }

    #[test]
    fn filter_rejects_inverted_price_range() {
        let err = validate_filter(&json!({"priceMin": 900000, "priceMax": 100})).unwrap_err();
        assert_eq!(err.fields(), vec!["priceMax"]);
    }
}
