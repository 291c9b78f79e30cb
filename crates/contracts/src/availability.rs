//! Availability calendar entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NOTE_LEN: usize = 500;

/// Sort keys accepted by the availability list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AvailabilitySortKey {
    Date,
    CreatedAt,
}

impl AvailabilitySortKey {
    pub const VALUES: &'static [&'static str] = &["date", "createdAt"];
}

/// One calendar day of a property's availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Availability {
    pub id: EntityId,
    pub property_id: EntityId,
    pub date: Timestamp,
    pub is_available: bool,
    pub min_nights: Option<i64>,
    pub max_nights: Option<i64>,
    /// Per-night price for this date, overriding the base rate.
    pub price_override: Option<f64>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an availability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateAvailability {
    pub property_id: EntityId,
    pub date: Timestamp,
    #[serde(default = "crate::common::default_true")]
    pub is_available: bool,
    pub min_nights: Option<i64>,
    pub max_nights: Option<i64>,
    pub price_override: Option<f64>,
    pub note: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateAvailability {
    pub id: EntityId,
    pub is_available: Option<bool>,
    pub min_nights: Option<i64>,
    pub max_nights: Option<i64>,
    pub price_override: Option<f64>,
    pub note: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AvailabilityFilter {
    pub property_id: Option<EntityId>,
    pub is_available: Option<bool>,
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
    pub sort_by: Option<AvailabilitySortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "availability",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("date").datetime(),
            FieldRule::required("isAvailable").boolean(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("maxNights").int_at_least(1),
            FieldRule::optional("priceOverride").at_least(0.0),
            FieldRule::optional("note").text(MAX_NOTE_LEN),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "availability.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("date").datetime(),
            FieldRule::optional("isAvailable").boolean(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("maxNights").int_at_least(1),
            FieldRule::optional("priceOverride").at_least(0.0),
            FieldRule::optional("note").text(MAX_NOTE_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "availability.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("isAvailable").boolean(),
            FieldRule::optional("minNights").int_at_least(1),
            FieldRule::optional("maxNights").int_at_least(1),
            FieldRule::optional("priceOverride").at_least(0.0),
            FieldRule::optional("note").text(MAX_NOTE_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("isAvailable").boolean(),
        FieldRule::optional("dateFrom").datetime(),
        FieldRule::optional("dateTo").datetime(),
        FieldRule::optional("sortBy").one_of(AvailabilitySortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("availability.filter", rules)
}

fn nights_range(violations: &mut Vec<FieldViolation>, min: Option<i64>, max: Option<i64>) {
    common::check_numeric_range(
        violations,
        "minNights",
        min.map(|n| n as f64),
        "maxNights",
        max.map(|n| n as f64),
    );
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Availability, ValidationError> {
    let record: Availability = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    nights_range(&mut violations, record.min_nights, record.max_nights);
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; `isAvailable` defaults to true.
pub fn validate_create(payload: &Value) -> Result<CreateAvailability, ValidationError> {
    let input: CreateAvailability = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    nights_range(&mut violations, input.min_nights, input.max_nights);
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateAvailability, ValidationError> {
    let update: UpdateAvailability = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    nights_range(&mut violations, update.min_nights, update.max_nights);
    into_result(violations)?;
    Ok(update)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<AvailabilityFilter, ValidationError> {
    let filter: AvailabilityFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "dateFrom",
        filter.date_from,
        "dateTo",
        filter.date_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn min_nights_may_not_exceed_max_nights() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "date": "2024-07-01T00:00:00Z",
            "minNights": 7,
            "maxNights": 3,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["maxNights"]);
    }
}
