//! Agent entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

/// Maximum length for an agent's display name.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum length for the free-text bio.
pub const MAX_BIO_LEN: usize = 2000;

/// Loose phone format: optional leading `+`, digits and common separators.
const PHONE_PATTERN: &str = r"^\+?[0-9 ().-]{7,20}$";

/// Lifecycle status of an agent account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AgentStatus {
    Pending,
    Active,
    Suspended,
    Archived,
}

impl AgentStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "ACTIVE", "SUSPENDED", "ARCHIVED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl Default for AgentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the agent list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AgentSortKey {
    Name,
    CreatedAt,
    AverageRating,
}

impl AgentSortKey {
    pub const VALUES: &'static [&'static str] = &["name", "createdAt", "averageRating"];
}

/// A fully-formed agent record, e.g. as read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Agent {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub status: AgentStatus,
    pub agency_id: Option<EntityId>,
    /// Commission percentage, 0–100.
    pub commission_rate: Option<f64>,
    pub average_rating: Option<f64>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateAgent {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub status: AgentStatus,
    pub agency_id: Option<EntityId>,
    pub commission_rate: Option<f64>,
    #[serde(default = "crate::common::default_true")]
    pub is_active: bool,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateAgent {
    pub id: EntityId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub status: Option<AgentStatus>,
    pub agency_id: Option<EntityId>,
    pub commission_rate: Option<f64>,
    pub is_active: Option<bool>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AgentFilter {
    pub search: Option<String>,
    pub status: Option<AgentStatus>,
    pub agency_id: Option<EntityId>,
    pub is_active: Option<bool>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<AgentSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "agent",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("bio").text(MAX_BIO_LEN),
            FieldRule::required("status").one_of(AgentStatus::VALUES),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("commissionRate").range(0.0, 100.0),
            FieldRule::optional("averageRating").range(0.0, 5.0),
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
        "agent.create",
        vec![
            FieldRule::required("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("bio").text(MAX_BIO_LEN),
            FieldRule::optional("status").one_of(AgentStatus::VALUES),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("commissionRate").range(0.0, 100.0),
            FieldRule::optional("isActive").boolean(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "agent.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("name").text_bounded(1, MAX_NAME_LEN),
            FieldRule::optional("email").email(),
            FieldRule::optional("phone").pattern(PHONE_PATTERN),
            FieldRule::optional("bio").text(MAX_BIO_LEN),
            FieldRule::optional("status").one_of(AgentStatus::VALUES),
            FieldRule::optional("agencyId").id(),
            FieldRule::optional("commissionRate").range(0.0, 100.0),
            FieldRule::optional("isActive").boolean(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("status").one_of(AgentStatus::VALUES),
        FieldRule::optional("agencyId").id(),
        FieldRule::optional("isActive").boolean(),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(AgentSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("agent.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Agent, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateAgent, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateAgent, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<AgentFilter, ValidationError> {
    let filter: AgentFilter = filter_shape().validate(payload)?;
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
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn validation_errors_are_returned_as_data() {
        let result = validate_create(&json!({"name": 42}));
        assert_matches!(result, Err(ref err) if err.has_field("name"));
    }

    #[test]
    fn create_with_name_only_defaults_status_to_pending() {
        let input = validate_create(&json!({"name": "Jane Doe"})).unwrap();
        assert_eq!(input.name, "Jane Doe");
        assert_eq!(input.status, AgentStatus::Pending);
        assert!(input.is_active);
    }

    #[test]
    fn create_without_name_cites_exactly_that_field() {
        let err = validate_create(&json!({"email": "jane@example.com"})).unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
    }

    #[test]
    fn create_rejects_server_populated_fields() {
        let err = validate_create(&json!({
            "name": "Jane Doe",
            "id": "a1",
            "createdAt": "2024-01-01T00:00:00Z",
        }))
        .unwrap_err();
        assert!(err.has_field("id"));
        assert!(err.has_field("createdAt"));
    }

    #[test]
    fn status_membership_is_case_sensitive() {
        let err = validate_create(&json!({"name": "Jane", "status": "pending"})).unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);
    }

    #[test]
    fn update_with_only_id_succeeds() {
        let update = validate_update(&json!({"id": "a1"})).unwrap();
        assert_eq!(update.id, "a1");
        assert!(update.name.is_none());
    }

    #[test]
    fn update_bad_rating_cites_only_that_field() {
        let err = validate_update(&json!({"id": "a1", "commissionRate": 250})).unwrap_err();
        assert_eq!(err.fields(), vec!["commissionRate"]);
    }

    #[test]
    fn empty_filter_applies_pagination_defaults() {
        let filter = validate_filter(&json!({})).unwrap();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 10);
        assert!(filter.status.is_none());
    }
}
