//! Review entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, SortOrder};

pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_COMMENT_LEN: usize = 2000;

/// Star rating bounds.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Moderation state of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ReviewStatus {
    Pending,
    Published,
    Rejected,
}

impl ReviewStatus {
    pub const VALUES: &'static [&'static str] = &["PENDING", "PUBLISHED", "REJECTED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Published => "PUBLISHED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Sort keys accepted by the review list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ReviewSortKey {
    Rating,
    CreatedAt,
}

impl ReviewSortKey {
    pub const VALUES: &'static [&'static str] = &["rating", "createdAt"];
}

/// A fully-formed review record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Review {
    pub id: EntityId,
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub reservation_id: Option<EntityId>,
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    /// Host's public reply.
    pub reply: Option<String>,
    pub status: ReviewStatus,
    pub stay_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateReview {
    pub property_id: EntityId,
    pub guest_id: EntityId,
    pub reservation_id: Option<EntityId>,
    pub rating: i64,
    pub title: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    pub stay_date: Option<Timestamp>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateReview {
    pub id: EntityId,
    pub rating: Option<i64>,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub reply: Option<String>,
    pub status: Option<ReviewStatus>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewFilter {
    pub property_id: Option<EntityId>,
    pub guest_id: Option<EntityId>,
    pub status: Option<ReviewStatus>,
    pub rating_min: Option<i64>,
    pub rating_max: Option<i64>,
    pub created_at_from: Option<Timestamp>,
    pub created_at_to: Option<Timestamp>,
    pub sort_by: Option<ReviewSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "review",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("reservationId").id(),
            FieldRule::required("rating").int_range(MIN_RATING, MAX_RATING),
            FieldRule::optional("title").text(MAX_TITLE_LEN),
            FieldRule::optional("comment").text(MAX_COMMENT_LEN),
            FieldRule::optional("reply").text(MAX_COMMENT_LEN),
            FieldRule::required("status").one_of(ReviewStatus::VALUES),
            FieldRule::optional("stayDate").datetime(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "review.create",
        vec![
            FieldRule::required("propertyId").id(),
            FieldRule::required("guestId").id(),
            FieldRule::optional("reservationId").id(),
            FieldRule::required("rating").int_range(MIN_RATING, MAX_RATING),
            FieldRule::optional("title").text(MAX_TITLE_LEN),
            FieldRule::optional("comment").text(MAX_COMMENT_LEN),
            FieldRule::optional("status").one_of(ReviewStatus::VALUES),
            FieldRule::optional("stayDate").datetime(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "review.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("rating").int_range(MIN_RATING, MAX_RATING),
            FieldRule::optional("title").text(MAX_TITLE_LEN),
            FieldRule::optional("comment").text(MAX_COMMENT_LEN),
            FieldRule::optional("reply").text(MAX_COMMENT_LEN),
            FieldRule::optional("status").one_of(ReviewStatus::VALUES),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("guestId").id(),
        FieldRule::optional("status").one_of(ReviewStatus::VALUES),
        FieldRule::optional("ratingMin").int_range(MIN_RATING, MAX_RATING),
        FieldRule::optional("ratingMax").int_range(MIN_RATING, MAX_RATING),
        FieldRule::optional("createdAtFrom").datetime(),
        FieldRule::optional("createdAtTo").datetime(),
        FieldRule::optional("sortBy").one_of(ReviewSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("review.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Review, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `PENDING`.
pub fn validate_create(payload: &Value) -> Result<CreateReview, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateReview, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<ReviewFilter, ValidationError> {
    let filter: ReviewFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_numeric_range(
        &mut violations,
        "ratingMin",
        filter.rating_min.map(|n| n as f64),
        "ratingMax",
        filter.rating_max.map(|n| n as f64),
    );
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
    fn rating_is_bounded_one_to_five() {
        for rating in MIN_RATING..=MAX_RATING {
            assert!(validate_create(&json!({
                "propertyId": "p1",
                "guestId": "g1",
                "rating": rating,
            }))
            .is_ok());
        }
        for rating in [0, 6, -1] {
            let err = validate_create(&json!({
                "propertyId": "p1",
                "guestId": "g1",
                "rating": rating,
            }))
            .unwrap_err();
            assert_eq!(err.fields(), vec!["rating"]);
        }
    }

    #[test]
    fn fractional_rating_is_rejected() {
        let err = validate_create(&json!({
            "propertyId": "p1",
            "guestId": "g1",
            "rating": 4.5,
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["rating"]);
    }
}
