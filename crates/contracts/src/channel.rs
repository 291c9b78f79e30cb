//! Messaging channel entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 80;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Visibility of a messaging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ChannelType {
    Public,
    Private,
    Direct,
}

impl ChannelType {
    pub const VALUES: &'static [&'static str] = &["PUBLIC", "PRIVATE", "DIRECT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Private => "PRIVATE",
            Self::Direct => "DIRECT",
        }
    }
}

impl Default for ChannelType {
    fn default() -> Self {
        Self::Public
    }
}

/// Sort keys accepted by the channel list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ChannelSortKey {
    Name,
    CreatedAt,
}

impl ChannelSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt"];
}

/// A fully-formed channel record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Channel {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub channel_type: ChannelType,
    pub agency_id: Option<EntityId>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateChannel {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub channel_type: ChannelType,
    pub agency_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateChannel {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub channel_type: Option<ChannelType>,
    pub is_archived: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChannelFilter {
    pub search: Option<String>,
    pub channel_type: Option<ChannelType>,
    pub agency_id: Option<EntityId>,
    pub is_archived: Option<bool>,
    pub sort_by: Option<ChannelSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "channel",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("channelType").one_of(ChannelType::VALUES),
            FieldRule::optional("agencyId").id(),
            FieldRule::required("isArchived").boolean(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "channel.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("channelType").one_of(ChannelType::VALUES),
            FieldRule::optional("agencyId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "channel.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("channelType").one_of(ChannelType::VALUES),
            FieldRule::optional("isArchived").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("channelType").one_of(ChannelType::VALUES),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("isArchived").boolean(),
        FieldRule::optional("sortBy").one_of(ChannelSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("channel.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Channel, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `channelType` defaults to `PUBLIC`.
pub fn validate_create(payload: &Value) -> Result<CreateChannel, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateChannel, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ChannelFilter, ValidationError> {
    filter_shape().validate(payload)
}
