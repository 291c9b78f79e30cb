//! Agency entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_NAME_LEN: usize = 160;
pub const MAX_ADDRESS_LEN: usize = 300;

const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Lifecycle status of an agency account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AgencyStatus {
    Pending,
    Active,
    Suspended,
}

impl AgencyStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "ACTIVE", "SUSPENDED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl Default for AgencyStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the agency list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AgencySortKey {
    Name,
    CreatedAt,
}

impl AgencySortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt"];
}

/// A fully-formed agency record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Agency {
    pub id: EntityId,
    pub name: String,
    pub legal_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub status: AgencyStatus,
    pub owner_id: Option<EntityId>,
    pub is_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateAgency {
    pub name: String,
    pub legal_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub status: AgencyStatus,
    pub owner_id: Option<EntityId>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateAgency {
    pub id: EntityId,
    pub name: Option<String>,
    pub legal_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub status: Option<AgencyStatus>,
    pub owner_id: Option<EntityId>,
    pub is_verified: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AgencyFilter {
    pub search: Option<String>,
    pub status: Option<AgencyStatus>,
    pub is_verified: Option<bool>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<AgencySortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "agency",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("legalName").text(MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("website").url(),
            FieldRule::optional("address").text(MAX_ADDRESS_LEN),
            FieldRule::required("status").one_of(AgencyStatus::VALUES),
            FieldRule::optional("ownerId").id(),
            FieldRule::required("isVerified").boolean(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "agency.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("legalName").text(MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("website").url(),
            FieldRule::optional("address").text(MAX_ADDRESS_LEN),
            FieldRule::optional("status").one_of(AgencyStatus::VALUES),
            FieldRule::optional("ownerId").id(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "agency.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("legalName").text(MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("website").url(),
            FieldRule::optional("address").text(MAX_ADDRESS_LEN),
            FieldRule::optional("status").one_of(AgencyStatus::VALUES),
            FieldRule::optional("ownerId").id(),
            FieldRule::optional("isVerified").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("status").one_of(AgencyStatus::VALUES),
        FieldRule::optional("isVerified").boolean(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(AgencySortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("agency.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Agency, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateAgency, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateAgency, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<AgencyFilter, ValidationError> {
    let filter: AgencyFilter = filter_shape().validate(payload)?;
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
    fn create_rejects_malformed_website() {
        let err = validate_create(&json!({"name": "Coastal Homes", "website": "coastal"}))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["website"]);
    }
}
