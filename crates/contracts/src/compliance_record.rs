//! Compliance record entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_REFERENCE_LEN: usize = 80;
pub const MAX_NOTES_LEN: usize = 2000;

/// Kind of compliance obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ComplianceType {
    License,
    Inspection,
    Insurance,
    Certification,
    Permit,
}

impl ComplianceType {
    pub const VALUES: &'static [&'static str] = &[
        "LICENSE",
        "INSPECTION",
        "INSURANCE",
        "CERTIFICATION",
        "PERMIT",
    ];
}

/// Review state of a compliance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ComplianceStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl ComplianceStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "APPROVED", "REJECTED", "EXPIRED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl Default for ComplianceStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the compliance record list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ComplianceRecordSortKey {
    ExpiresAt,
    CreatedAt,
}

impl ComplianceRecordSortKey {
    pub const VALUES: &'static [&'static str] = &["expiresAt", "createdAt"];
}

/// A fully-formed compliance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComplianceRecord {
    pub id: EntityId,
    pub property_id: EntityId,
    pub compliance_type: ComplianceType,
    pub status: ComplianceStatus,
    pub reference_number: Option<String>,
    pub issued_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a compliance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateComplianceRecord {
    pub property_id: EntityId,
    pub compliance_type: ComplianceType,
    #[serde(default)]
    pub status: ComplianceStatus,
    pub reference_number: Option<String>,
    pub issued_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateComplianceRecord {
    pub id: EntityId,
    pub compliance_type: Option<ComplianceType>,
    pub status: Option<ComplianceStatus>,
    pub reference_number: Option<String>,
    pub issued_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ComplianceRecordFilter {
    pub property_id: Option<EntityId>,
    pub compliance_type: Option<ComplianceType>,
    pub status: Option<ComplianceStatus>,
    pub expires_at_from: Option<Timestamp>,
    pub expires_at_to: Option<Timestamp>,
    pub sort_by: Option<ComplianceRecordSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "compliance_record",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("complianceType").one_of(ComplianceType::VALUES),
            FieldRule::required("status").one_of(ComplianceStatus::VALUES),
            FieldRule::optional("referenceNumber").text(MAX_REFERENCE_LEN),
            FieldRule::optional("issuedAt").datetime(),
            FieldRule::optional("expiresAt").datetime(),
            FieldRule::optional("documentUrl").url(),
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
        "compliance_record.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("complianceType").one_of(ComplianceType::VALUES),
            FieldRule::optional("status").one_of(ComplianceStatus::VALUES),
            FieldRule::optional("referenceNumber").text(MAX_REFERENCE_LEN),
            FieldRule::optional("issuedAt").datetime(),
            FieldRule::optional("expiresAt").datetime(),
            FieldRule::optional("documentUrl").url(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "compliance_record.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("complianceType").one_of(ComplianceType::VALUES),
            FieldRule::optional("status").one_of(ComplianceStatus::VALUES),
            FieldRule::optional("referenceNumber").text(MAX_REFERENCE_LEN),
            FieldRule::optional("issuedAt").datetime(),
            FieldRule::optional("expiresAt").datetime(),
            FieldRule::optional("documentUrl").url(),
            FieldRule::optional("notes").text(MAX_NOTES_LEN),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("complianceType").one_of(ComplianceType::VALUES),
        FieldRule::optional("status").one_of(ComplianceStatus::VALUES),
        FieldRule::optional("expiresAtFrom").datetime(),
        FieldRule::optional("expiresAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(ComplianceRecordSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("compliance_record.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<ComplianceRecord, ValidationError> {
    let record: ComplianceRecord = canonical_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "issuedAt",
        record.issued_at,
        "expiresAt",
        record.expires_at,
    );
    into_result(violations)?;
    Ok(record)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateComplianceRecord, ValidationError> {
    let input: CreateComplianceRecord = create_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "issuedAt",
        input.issued_at,
        "expiresAt",
        input.expires_at,
    );
    into_result(violations)?;
    Ok(input)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateComplianceRecord, ValidationError> {
    let update: UpdateComplianceRecord = update_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_period(
        &mut violations,
        "issuedAt",
        update.issued_at,
        "expiresAt",
        update.expires_at,
    );
    into_result(violations)?;
    Ok(update)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ComplianceRecordFilter, ValidationError> {
    let filter: ComplianceRecordFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "expiresAtFrom",
        filter.expires_at_from,
        "expiresAtTo",
        filter.expires_at_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expiry_must_follow_issue() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "complianceType": "LICENSE",
            "issuedAt": "2024-06-01T00:00:00Z",
            "expiresAt": "2024-01-01T00:00:00Z",
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["expiresAt"]);
    }
}
