//! Guest (tenant) entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 80;
pub const MAX_NOTES_LEN: usize = 2000;
pub const MAX_DOCUMENT_NUMBER_LEN: usize = 60;

const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Standing of a guest account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GuestStatus {
    Active,
    Blacklisted,
    Archived,
}

impl GuestStatus {
    pub const VALUES: &'static [&'static str] = &["ACTIVE", "BLACKLISTED", "ARCHIVED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Blacklisted => "BLACKLISTED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl Default for GuestStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Identity document kinds accepted at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum DocumentType {
    Passport,
    IdCard,
    DriverLicense,
}

impl DocumentType {
    pub const VALUES: &'static [&'static str] = &["PASSPORT", "ID_CARD", "DRIVER_LICENSE"];
}

/// Sort keys accepted by the guest list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum GuestSortKey {
    LastName,
    CreatedAt,
}

impl GuestSortKey {
    pub const VALUES: &'static [&'static str] = &["lastName", "createdAt"];
}

/// A fully-formed guest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Guest {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub date_of_birth: Option<Timestamp>,
    pub status: GuestStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateGuest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub date_of_birth: Option<Timestamp>,
    #[serde(default)]
    pub status: GuestStatus,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateGuest {
    pub id: EntityId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nationality: Option<String>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub date_of_birth: Option<Timestamp>,
    pub status: Option<GuestStatus>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GuestFilter {
    pub search: Option<String>,
    pub status: Option<GuestStatus>,
    pub nationality: Option<String>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<GuestSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "guest",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("firstName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("lastName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("nationality").text(MAX_NAME_LEN),
            FieldRule::optional("documentType").one_of(DocumentType::VALUES),
            FieldRule::optional("documentNumber").text(MAX_DOCUMENT_NUMBER_LEN),
            FieldRule::optional("dateOfBirth").datetime(),
            FieldRule::required("status").one_of(GuestStatus::VALUES),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "guest.create",
        vec![
            FieldRule::required("firstName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::required("lastName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("nationality").text(MAX_NAME_LEN),
            FieldRule::optional("documentType").one_of(DocumentType::VALUES),
            FieldRule::optional("documentNumber").text(MAX_DOCUMENT_NUMBER_LEN),
            FieldRule::optional("dateOfBirth").datetime(),
            FieldRule::optional("status").one_of(GuestStatus::VALUES),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "guest.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("firstName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("lastName").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("nationality").text(MAX_NAME_LEN),
            FieldRule::optional("documentType").one_of(DocumentType::VALUES),
            FieldRule::optional("documentNumber").text(MAX_DOCUMENT_NUMBER_LEN),
            FieldRule::optional("dateOfBirth").datetime(),
            FieldRule::optional("status").one_of(GuestStatus::VALUES),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("status").one_of(GuestStatus::VALUES),
        FieldRule::optional("nationality").text(MAX_NAME_LEN),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(GuestSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("guest.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Guest, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `ACTIVE`.
pub fn validate_create(payload: &Value) -> Result<CreateGuest, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateGuest, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<GuestFilter, ValidationError> {
    let filter: GuestFilter = filter_shape().validate(payload)?;
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
    fn document_type_is_a_closed_set() {
        let err = validate_create(&json!({
            "firstName": "Maya",
            "lastName": "Costa",
            "documentType": "LIBRARY_CARD",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["documentType"]);
    }
}
