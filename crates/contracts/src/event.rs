//! Event (viewing, open house, inspection) entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;
pub const MAX_VENUE_LEN: usize = 300;

/// Kind of scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum EventType {
    Viewing,
    OpenHouse,
    Inspection,
    Meeting,
    Handover,
}

impl EventType {
    pub const VALUES: &'static [&'static str] =
        &["VIEWING", "OPEN_HOUSE", "INSPECTION", "MEETING", "HANDOVER"];
}

/// Scheduling state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum EventStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const VALUES: &'static [&'static str] = &["SCHEDULED", "COMPLETED", "CANCELLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

/// Sort keys accepted by the event list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum EventSortKey {
    ScheduledAt,
    CreatedAt,
}

impl EventSortKey {
    pub const VALUES: &'static [&'static str] = &["scheduledAt", "createdAt"];
}

/// A fully-formed event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    pub status: EventStatus,
    pub scheduled_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub venue: Option<String>,
    pub property_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub attendee_ids: Option<Vec<EntityId>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_type: EventType,
    #[serde(default)]
    pub status: EventStatus,
    pub scheduled_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub venue: Option<String>,
    pub property_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub attendee_ids: Option<Vec<EntityId>>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateEvent {
    pub id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
    pub scheduled_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub venue: Option<String>,
    pub agent_id: Option<EntityId>,
    pub attendee_ids: Option<Vec<EntityId>>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventFilter {
    pub search: Option<String>,
    pub event_type: Option<EventType>,
    pub status: Option<EventStatus>,
    pub property_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub scheduled_at_from: Option<Timestamp>,
    pub scheduled_at_to: Option<Timestamp>,
    pub sort_by: Option<EventSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "event",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("eventType").one_of(EventType::VALUES),
            FieldRule::required("status").one_of(EventStatus::VALUES),
            FieldRule::required("scheduledAt").datetime(),
            FieldRule::optional("endsAt").datetime(),
            FieldRule::optional("venue").text(MAX_VENUE_LEN),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("attendeeIds").id_array(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "event.create",
        vec![
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("eventType").one_of(EventType::VALUES),
            FieldRule::optional("status").one_of(EventStatus::VALUES),
            FieldRule::required("scheduledAt").datetime(),
            FieldRule::optional("endsAt").datetime(),
            FieldRule::optional("venue").text(MAX_VENUE_LEN),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("attendeeIds").id_array(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "event.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("eventType").one_of(EventType::VALUES),
            FieldRule::optional("status").one_of(EventStatus::VALUES),
            FieldRule::optional("scheduledAt").datetime(),
            FieldRule::optional("endsAt").datetime(),
            FieldRule::optional("venue").text(MAX_VENUE_LEN),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("attendeeIds").id_array(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("eventType").one_of(EventType::VALUES),
        FieldRule::optional("status").one_of(EventStatus::VALUES),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("agentId").id(),
        FieldRule::optional("scheduledAtFrom").datetime(),
        FieldRule::optional("scheduledAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(EventSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("event.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Event, ValidationError> {
    let record: Event = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "scheduledAt",
        Some(record.scheduled_at),
        "endsAt",
        record.ends_at,
    );
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; `status` defaults to `SCHEDULED`.
pub fn validate_create(payload: &Value) -> Result<CreateEvent, ValidationError> {
    let input: CreateEvent = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "scheduledAt",
        Some(input.scheduled_at),
        "endsAt",
        input.ends_at,
    );
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; the time-order check fires only when both
/// instants are supplied.
pub fn validate_update(payload: &Value) -> Result<UpdateEvent, ValidationError> {
    let update: UpdateEvent = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "scheduledAt",
        update.scheduled_at,
        "endsAt",
        update.ends_at,
    );
    into_result(violations)?;
    Ok(update)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<EventFilter, ValidationError> {
    let filter: EventFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "scheduledAtFrom",
        filter.scheduled_at_from,
        "scheduledAtTo",
        filter.scheduled_at_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_cannot_end_before_it_starts() {
        let err = validate_create(&json!({
            "title": "Open house",
            "eventType": "OPEN_HOUSE",
            "scheduledAt": "2024-06-01T14:00:00Z",
            "endsAt": "2024-06-01T12:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["endsAt"]);
    }

    #[test]
    fn attendee_ids_must_all_be_identifiers() {
        let err = validate_create(&json!({
            "title": "Viewing",
            "eventType": "VIEWING",
            "scheduledAt": "2024-06-01T14:00:00Z",
            "attendeeIds": ["g1", ""],
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["attendeeIds[1]"]);
    }
}
