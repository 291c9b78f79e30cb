//! Communication (message) entity contracts.
//!
//! `metadata` stays a free-form JSON object: it carries genuinely open
//! sender/attachment annotations that have no fixed schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_CONTENT_LEN: usize = 5000;
pub const MAX_ENTITY_TYPE_LEN: usize = 60;

/// Intent of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CommunicationType {
    Problem,
    Request,
    Advice,
    Information,
    Feedback,
    Chat,
    System,
}

impl CommunicationType {
    pub const VALUES: &'static [&'static str] = &[
        "PROBLEM",
        "REQUEST",
        "ADVICE",
        "INFORMATION",
        "FEEDBACK",
        "CHAT",
        "SYSTEM",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problem => "PROBLEM",
            Self::Request => "REQUEST",
            Self::Advice => "ADVICE",
            Self::Information => "INFORMATION",
            Self::Feedback => "FEEDBACK",
            Self::Chat => "CHAT",
            Self::System => "SYSTEM",
        }
    }
}

/// Sort keys accepted by the communication list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum CommunicationSortKey {
    CreatedAt,
}

impl CommunicationSortKey {
    pub const VALUES: &'static [&'static str] = &["createdAt"];
}

/// A fully-formed communication record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Communication {
    pub id: EntityId,
    pub sender_id: EntityId,
    pub receiver_id: EntityId,
    pub communication_type: CommunicationType,
    pub content: String,
    /// Polymorphic anchor: the entity this message is about.
    pub entity_id: Option<EntityId>,
    pub entity_type: Option<String>,
    pub metadata: Option<Value>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub thread_id: Option<EntityId>,
    pub reply_to_id: Option<EntityId>,
    pub channel_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub is_edited: bool,
    pub edited_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateCommunication {
    pub sender_id: EntityId,
    pub receiver_id: EntityId,
    pub communication_type: CommunicationType,
    pub content: String,
    pub entity_id: Option<EntityId>,
    pub entity_type: Option<String>,
    pub metadata: Option<Value>,
    pub thread_id: Option<EntityId>,
    pub reply_to_id: Option<EntityId>,
    pub channel_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
}

/// Partial update, e.g. marking a message read or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateCommunication {
    pub id: EntityId,
    pub content: Option<String>,
    pub metadata: Option<Value>,
    pub is_read: Option<bool>,
    pub read_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub is_edited: Option<bool>,
    pub edited_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommunicationFilter {
    pub sender_id: Option<EntityId>,
    pub receiver_id: Option<EntityId>,
    pub communication_type: Option<CommunicationType>,
    pub thread_id: Option<EntityId>,
    pub channel_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub agency_id: Option<EntityId>,
    pub is_read: Option<bool>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<CommunicationSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "communication",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("senderId").id(),
            FieldRule::required("receiverId").id(),
            FieldRule::required("communicationType").one_of(CommunicationType::VALUES),
            FieldRule::required("content").text_bounded(1, MAX_CONTENT_LEN),
            FieldRule::optional("entityId").id(),
            FieldRule::optional("entityType").text(MAX_ENTITY_TYPE_LEN),
            FieldRule::optional("metadata").object(),
            FieldRule::required("isRead").boolean(),
            FieldRule::optional("readAt").datetime(),
            FieldRule::optional("deliveredAt").datetime(),
            FieldRule::optional("threadId").id(),
            FieldRule::optional("replyToId").id(),
            FieldRule::optional("channelId").id(),
            FieldRule::optional("ticketId").id(),
            FieldRule::optional("agencyId").id(),
            FieldRule::required("isEdited").boolean(),
            FieldRule::optional("editedAt").datetime(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "communication.create",
        vec![
            FieldRule::required("senderId").id(),
            FieldRule::required("receiverId").id(),
            FieldRule::required("communicationType").one_of(CommunicationType::VALUES),
            FieldRule::required("content").text_bounded(1, MAX_CONTENT_LEN),
            FieldRule::optional("entityId").id(),
            FieldRule::optional("entityType").text(MAX_ENTITY_TYPE_LEN),
            FieldRule::optional("metadata").object(),
            FieldRule::optional("threadId").id(),
            FieldRule::optional("replyToId").id(),
            FieldRule::optional("channelId").id(),
            FieldRule::optional("ticketId").id(),
            FieldRule::optional("agencyId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "communication.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("content").text_bounded(1, MAX_CONTENT_LEN),
            FieldRule::optional("metadata").object(),
            FieldRule::optional("isRead").boolean(),
            FieldRule::optional("readAt").datetime(),
            FieldRule::optional("deliveredAt").datetime(),
            FieldRule::optional("isEdited").boolean(),
            FieldRule::optional("editedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("senderId").id(),
        FieldRule::optional("receiverId").id(),
        FieldRule::optional("communicationType").one_of(CommunicationType::VALUES),
        FieldRule::optional("threadId").id(),
        FieldRule::optional("channelId").id(),
        FieldRule::optional("ticketId").id(),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("isRead").boolean(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(CommunicationSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("communication.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Communication, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateCommunication, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateCommunication, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<CommunicationFilter, ValidationError> {
    let filter: CommunicationFilter = filter_shape().validate(payload)?;
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
    fn create_rejects_empty_content() {
        let err = validate_create(&json!({
            "senderId": "u1",
            "receiverId": "u2",
            "communicationType": "CHAT",
            "content": "",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["content"]);
    }

    #[test]
    fn metadata_must_be_an_object() {
        let err = validate_create(&json!({
            "senderId": "u1",
            "receiverId": "u2",
            "communicationType": "CHAT",
            "content": "hello",
            "metadata": "not-an-object",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["metadata"]);
    }
}
