//! Photo entity contracts.
//!
//! Photos are leaf records eagerly embedded by property shapes; the
//! crate-internal check below backs that delegation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{FieldViolation, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_CAPTION_LEN: usize = 300;
pub const MAX_URL_LEN: usize = 2048;

/// Accepted image media types.
pub const MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Sort keys accepted by the photo list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum PhotoSortKey {
    SortIndex,
    CreatedAt,
}

impl PhotoSortKey {
    pub const VALUES: &'static [&'static str] = &["sortIndex", "createdAt"];
}

/// A fully-formed photo record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Photo {
    pub id: EntityId,
    pub url: String,
    pub caption: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub mime_type: Option<String>,
    pub is_cover: bool,
    pub sort_index: i64,
    pub property_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePhoto {
    pub url: String,
    pub caption: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub sort_index: i64,
    pub property_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePhoto {
    pub id: EntityId,
    pub caption: Option<String>,
    pub is_cover: Option<bool>,
    pub sort_index: Option<i64>,
    pub property_id: Option<EntityId>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PhotoFilter {
    pub property_id: Option<EntityId>,
    pub is_cover: Option<bool>,
    pub sort_by: Option<PhotoSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "photo",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("url").url(),
            FieldRule::optional("caption").text(MAX_CAPTION_LEN),
            FieldRule::optional("width").int_at_least(1),
            FieldRule::optional("height").int_at_least(1),
            FieldRule::optional("mimeType").one_of(MIME_TYPES),
            FieldRule::required("isCover").boolean(),
            FieldRule::required("sortIndex").int_at_least(0),
            FieldRule::optional("propertyId").id(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "photo.create",
        vec![
            FieldRule::required("url").url(),
            FieldRule::optional("caption").text(MAX_CAPTION_LEN),
            FieldRule::optional("width").int_at_least(1),
            FieldRule::optional("height").int_at_least(1),
            FieldRule::optional("mimeType").one_of(MIME_TYPES),
            FieldRule::optional("isCover").boolean(),
            FieldRule::optional("sortIndex").int_at_least(0),
            FieldRule::optional("propertyId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "photo.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("caption").text(MAX_CAPTION_LEN),
            FieldRule::optional("isCover").boolean(),
            FieldRule::optional("sortIndex").int_at_least(0),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("isCover").boolean(),
        FieldRule::optional("sortBy").one_of(PhotoSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("photo.filter", rules)
}

/// Check used when photos are embedded in a property's canonical shape.
pub(crate) fn canonical_check(payload: &Value) -> Vec<FieldViolation> {
    canonical_shape().check(payload)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Photo, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreatePhoto, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdatePhoto, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<PhotoFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_rejects_non_url() {
        let err = validate_create(&json!({"url": "not a url"})).unwrap_err();
        assert_eq!(err.fields(), vec!["url"]);
    }

    #[test]
    fn mime_type_is_a_closed_set() {
        let err = validate_create(&json!({
            "url": "https://cdn.example.com/p/1.gif",
            "mimeType": "image/gif",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["mimeType"]);
    }
}
