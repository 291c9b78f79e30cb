//! Hashtag entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

/// Tag format: optional leading `#`, then letters, digits, underscores.
const NAME_PATTERN: &str = r"^#?[A-Za-z0-9_]{1,50}$";

/// Broad grouping for tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum HashtagCategory {
    Property,
    Event,
    General,
}

impl HashtagCategory {
    pub const VALUES: &'static [&'static str] = &["PROPERTY", "EVENT", "GENERAL"];
}

impl Default for HashtagCategory {
    fn default() -> Self {
        Self::General
    }
}

/// Sort keys accepted by the hashtag list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum HashtagSortKey {
    Name,
    UsageCount,
    CreatedAt,
}

impl HashtagSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "usageCount", "createdAt"];
}

/// A fully-formed hashtag record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Hashtag {
    pub id: EntityId,
    pub name: String,
    pub category: HashtagCategory,
    pub usage_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a hashtag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateHashtag {
    pub name: String,
    #[serde(default)]
    pub category: HashtagCategory,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateHashtag {
    pub id: EntityId,
    pub name: Option<String>,
    pub category: Option<HashtagCategory>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HashtagFilter {
    pub search: Option<String>,
    pub category: Option<HashtagCategory>,
    pub sort_by: Option<HashtagSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "hashtag",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").pattern(NAME_PATTERN),
            FieldRule::required("category").one_of(HashtagCategory::VALUES),
            FieldRule::required("usageCount").int_at_least(0),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "hashtag.create",
        vec![
            FieldRule::required("name").pattern(NAME_PATTERN),
            FieldRule::optional("category").one_of(HashtagCategory::VALUES),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "hashtag.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").pattern(NAME_PATTERN),
            FieldRule::optional("category").one_of(HashtagCategory::VALUES),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("category").one_of(HashtagCategory::VALUES),
        FieldRule::optional("sortBy").one_of(HashtagSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("hashtag.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Hashtag, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `category` defaults to `GENERAL`.
pub fn validate_create(payload: &Value) -> Result<CreateHashtag, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateHashtag, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<HashtagFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_rejects_spaces() {
        assert!(validate_create(&json!({"name": "#seaview"})).is_ok());
        let err = validate_create(&json!({"name": "sea view"})).unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
    }
}
