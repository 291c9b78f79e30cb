//! Task entity contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use rentora_core::error::{into_result, ValidationError};
use rentora_core::schema::{FieldRule, Shape};
use rentora_core::types::{EntityId, Timestamp};

use crate::common::{self, Priority, SortOrder};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub const VALUES: &'static [&'static str] = &["TODO", "IN_PROGRESS", "DONE", "CANCELLED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

/// Sort keys accepted by the task list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum TaskSortKey {
    DueDate,
    CreatedAt,
}

impl TaskSortKey {
    pub const VALUES: &'static [&'static str] = &["dueDate", "createdAt"];
}

/// A fully-formed task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Fields a caller may set when creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    pub assignee_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub due_date: Option<Timestamp>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTask {
    pub id: EntityId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<EntityId>,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
}

/// List-query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<EntityId>,
    pub property_id: Option<EntityId>,
    pub ticket_id: Option<EntityId>,
    pub due_date_from: Option<Timestamp>,
    pub due_date_to: Option<Timestamp>,
    pub sort_by: Option<TaskSortKey>,
    pub sort_order: Option<SortOrder>,
    #[serde(default = "crate::common::default_page")]
    pub page: i64,
    #[serde(default = "crate::common::default_page_size")]
    pub page_size: i64,
}

fn canonical_shape() -> Shape {
    Shape::new(
        "task",
        vec![
            FieldRule::required("id").id(),
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::required("status").one_of(TaskStatus::VALUES),
            FieldRule::required("priority").one_of(Priority::VALUES),
            FieldRule::optional("assigneeId").id(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("ticketId").id(),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("completedAt").datetime(),
            FieldRule::required("createdAt").datetime(),
            FieldRule::required("updatedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
    .allow_unknown()
}

fn create_shape() -> Shape {
    Shape::new(
        "task.create",
        vec![
            FieldRule::required("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("status").one_of(TaskStatus::VALUES),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::optional("assigneeId").id(),
            FieldRule::optional("propertyId").id(),
            FieldRule::optional("ticketId").id(),
            FieldRule::optional("dueDate").datetime(),
        ],
    )
}

fn update_shape() -> Shape {
    Shape::new(
        "task.update",
        vec![
            FieldRule::required("id").id(),
            FieldRule::optional("title").text_bounded(1, MAX_TITLE_LEN),
            FieldRule::optional("description").text(MAX_DESCRIPTION_LEN),
            FieldRule::optional("status").one_of(TaskStatus::VALUES),
            FieldRule::optional("priority").one_of(Priority::VALUES),
            FieldRule::optional("assigneeId").id(),
            FieldRule::optional("dueDate").datetime(),
            FieldRule::optional("completedAt").datetime(),
            FieldRule::optional("deletedAt").datetime(),
        ],
    )
}

fn filter_shape() -> Shape {
    let mut rules = vec![
        FieldRule::optional("search").text(200),
        FieldRule::optional("status").one_of(TaskStatus::VALUES),
        FieldRule::optional("priority").one_of(Priority::VALUES),
        FieldRule::optional("assigneeId").id(),
        FieldRule::optional("propertyId").id(),
        FieldRule::optional("ticketId").id(),
        FieldRule::optional("dueDateFrom").datetime(),
        FieldRule::optional("dueDateTo").datetime(),
        FieldRule::optional("sortBy").one_of(TaskSortKey::VALUES),
        FieldRule::optional("sortOrder").one_of(SortOrder::VALUES),
    ];
    rules.extend(common::pagination_rules());
    Shape::new("task.filter", rules)
}

/// Validate a fully-formed record, e.g. one read back from storage.
pub fn validate_canonical(payload: &Value) -> Result<Task, ValidationError> {
    canonical_shape().validate(payload)
}

/// Validate a creation payload; `status` defaults to `TODO` and
/// `priority` to `MEDIUM`.
pub fn validate_create(payload: &Value) -> Result<CreateTask, ValidationError> {
    create_shape().validate(payload)
}

/// Validate a partial update; only `id` is required.
pub fn validate_update(payload: &Value) -> Result<UpdateTask, ValidationError> {
    update_shape().validate(payload)
}

/// Validate list-query parameters; pagination defaults apply.
pub fn validate_filter(payload: &Value) -> Result<TaskFilter, ValidationError> {
    let filter: TaskFilter = filter_shape().validate(payload)?;
    let mut violations = Vec::new();
    common::check_date_range(
        &mut violations,
        "dueDateFrom",
        filter.due_date_from,
        "dueDateTo",
        filter.due_date_to,
    );
    into_result(violations)?;
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_create_defaults_status_and_priority() {
        let input = validate_create(&json!({"title": "Replace boiler filter"})).unwrap();
        assert_eq!(input.status, TaskStatus::Todo);
        assert_eq!(input.priority, Priority::Medium);
    }
}
