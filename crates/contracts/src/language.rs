//! Language entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::ValidationError;
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 80;

/// BCP 47-ish tag: two-letter language, optional region (`en`, `pt-BR`).
const CODE_PATTERN: &str = r"^[a-z]{2}(-[A-Z]{2})?$";

/// Sort keys accepted by the language list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum LanguageSortKey {
    Code,
    Name,
}

impl LanguageSortKey {
    pub const VALUES: &'static [&'static str] = &["code", "name"];
}

/// A fully-formed language record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Language {
    pub id: EntityId,
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateLanguage {
    pub code: String,
    pub name: String,
    pub native_name: Option<String>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateLanguage {
    pub id: EntityId,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LanguageFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub sort_by: Option<LanguageSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "language",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("nativeName").text(MAX_NAME_LEN),
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
        "language.create",
        vec![
            FieldRule::required("code").pattern(CODE_PATTERN),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("nativeName").text(MAX_NAME_LEN),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "language.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("nativeName").text(MAX_NAME_LEN),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("sortBy").one_of(LanguageSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("language.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Language, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload.
pub fn validate_create(payload: &Value) -> Result<CreateLanguage, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; the immutable `code` is not updatable.
pub fn validate_update(payload: &Value) -> Result<UpdateLanguage, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<LanguageFilter, ValidationError> {
    filter_shape().validate(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_accepts_region_suffix() {
        assert!(validate_create(&json!({"code": "pt-BR", "name": "Portuguese"})).is_ok());
        let err = validate_create(&json!({"code": "PT", "name": "Portuguese"})).unwrap_err();
        assert_eq!(err.fields(), vec!["code"]);
    }
}
