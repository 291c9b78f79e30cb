//! Support ticket entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, Priority, SortOrder};

pub const MAX_SUBJECT_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Support workflow state. The schema layer enforces membership only;
/// transition legality belongs to the procedure layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Archived,
}

impl TicketStatus {
    pub const VALUES: &'static [&'static str] =
        &["OPEN", "IN_PROGRESS", "RESOLVED", "CLOSED", "ARCHIVED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Sort keys accepted by the ticket list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TicketSortKey {
    CreatedAt,
    UpdatedAt,
}

impl TicketSortKey {
    pub const VALUES: &'static [&'static str] = &["createdAt", "updatedAt"];
}

/// A fully-formed ticket record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Ticket {
    pub id: EntityId,
    pub subject: String,
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    /// The user who opened the ticket.
    pub user_id: EntityId,
    pub agent_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTicket {
    pub subject: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    pub user_id: EntityId,
    pub agent_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTicket {
    pub id: EntityId,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub agent_id: Option<EntityId>,
    pub closed_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub user_id: Option<EntityId>,
    pub agent_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<TicketSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "ticket",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("subject").text_bounded(1, MAX_SUBJECT_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("status").one_of(TicketStatus::VALUES),
            FieldRule::required("priority").one_of(Priority::VALUES),
            FieldRule::required("userId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("closedAt").datetime(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "ticket.create",
        vec![
            FieldRule::required("subject").text_bounded(1, MAX_SUBJECT_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("status").one_of(TicketStatus::VALUES),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::required("userId").id(),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("propertyId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "ticket.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("subject").text_bounded(1, MAX_SUBJECT_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("status").one_of(TicketStatus::VALUES),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::optional("agentId").id(),
            FieldRule::optional("closedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("status").one_of(TicketStatus::VALUES),
        FieldRule::optional("priority").one_of(Priority::VALUES),
        FieldRule::optional("userId").id(),
        FieldRule::optional("agentId").id(),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(TicketSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("ticket.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Ticket, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `OPEN` and
/// `priority` to `MEDIUM`.
pub fn validate_create(payload: &Value) -> Result<CreateTicket, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateTicket, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<TicketFilter, ValidationError> {
    let filter: TicketFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
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
    fn create_defaults_status_open_priority_medium() {
        let input = validate_create(&json!({
            "subject": "Heating not working",
            "userId": "u1",
        }))
        .unwrap();
        assert_eq!(input.status, TicketStatus::Open);
        assert_eq!(input.priority, Priority::Medium);
    }

    #[test]
    fn status_variants_with_case_or_whitespace_noise_are_rejected() {
        for bad in ["open", "Open", " OPEN", "OPEN ", "IN PROGRESS"] {
            let err = validate_create(&json!({
                "subject": "Heating not working",
                "userId": "u1",
                "status": bad,
            }))
            .unwrap_err();
            assert_eq!(err.fields(), vec!["status"], "{bad:?} should be rejected");
        }
    }
}
