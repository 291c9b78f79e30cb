//! Mention entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_CONTEXT_LEN: usize = 500;

/// What kind of entity was mentioned.
pub const MENTION_ENTITY_TYPES: &[&str] = &["PROPERTY", "AGENT", "AGENCY", "EVENT"];

/// Sort keys accepted by the mention list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MentionSortKey {
    CreatedAt,
}

impl MentionSortKey {
    pub const VALUES: &'static [&'static str] = &["createdAt"];
}

/// A fully-formed mention record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Mention {
    pub id: EntityId,
    pub entity_type: String,
    pub entity_id: EntityId,
    pub mentioned_by_id: Option<EntityId>,
    /// Snippet of the text surrounding the mention.
    pub context: Option<String>,
    pub url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a mention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateMention {
    pub entity_type: String,
    pub entity_id: EntityId,
    pub mentioned_by_id: Option<EntityId>,
    pub context: Option<String>,
    pub url: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateMention {
    pub id: EntityId,
    pub context: Option<String>,
    pub url: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MentionFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<EntityId>,
    pub mentioned_by_id: Option<EntityId>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<MentionSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "mention",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("entityType").one_of(MENTION_ENTITY_TYPES),
            FieldRule::required("entityId").id(),
            FieldRule::optional("mentionedById").id(),
            FieldRule::optional("context").text(MAX_CONTEXT_LEN),
            FieldRule::optional("url").url(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "mention.create",
        vec![
            FieldRule::required("entityType").one_of(MENTION_ENTITY_TYPES),
            FieldRule::required("entityId").id(),
            FieldRule::optional("mentionedById").id(),
            FieldRule::optional("context").text(MAX_CONTEXT_LEN),
            FieldRule::optional("url").url(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "mention.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("context").text(MAX_CONTEXT_LEN),
            FieldRule::optional("url").url(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("entityType").one_of(MENTION_ENTITY_TYPES),
        FieldRule::optional("entityId").id(),
        FieldRule::optional("mentionedById").id(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(MentionSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("mention.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Mention, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateMention, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateMention, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<MentionFilter, ValidationError> {
    let filter: MentionFilter = filter_shape().validate(payload)?;
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
