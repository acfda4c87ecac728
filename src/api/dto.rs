//! Data Transfer Objects for API requests and responses.
//!
//! This module contains DTOs that are separate from domain models,
//! providing a clean API contract. The same types are used by the HTTP
//! client, so every DTO serializes and deserializes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{FieldError, ValidationError};
use crate::domain::calendar::{self, parse_iso8601_date};
use crate::domain::{Task, TaskDraft, TaskId, TaskStatus, Timestamp};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

// =============================================================================
// Task DTOs
// =============================================================================

/// Request body for creating or replacing a task.
///
/// Every field is optional at the type level so that a missing title or a
/// malformed status is reported as a validation error with a field name
/// instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Title of the task (required).
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// ISO 8601 date or date-time.
    #[serde(default)]
    pub due_date: Option<String>,
    /// One of `pending`, `in-progress`, `done`.
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskRequest {
    /// Creates a request with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl From<&Task> for TaskRequest {
    /// Builds a replacement request carrying every field of `task`.
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: task.description.clone(),
            due_date: task.due_date.map(calendar::date_key),
            status: Some(task.status.as_str().to_string()),
        }
    }
}

/// Response DTO for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: TaskId,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: Option<String>,
    /// Due calendar day as `YYYY-MM-DD`.
    #[serde(default, with = "calendar::optional_local_date")]
    pub due_date: Option<NaiveDate>,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: Timestamp,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

impl From<TaskResponse> for Task {
    fn from(response: TaskResponse) -> Self {
        Self {
            id: response.id,
            title: response.title,
            description: response.description,
            due_date: response.due_date,
            status: response.status,
            created_at: response.created_at,
        }
    }
}

/// Response body of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always `true`.
    pub success: bool,
}

// =============================================================================
// Validation
// =============================================================================

/// Validates a task title.
///
/// # Validation Rules
///
/// - Title is required and must not be blank
/// - Title must not exceed 200 characters
///
/// # Errors
///
/// Returns a `ValidationError` for the `title` field.
pub fn validate_title(title: Option<&str>) -> Result<String, ValidationError> {
    let title = title.map(str::trim).unwrap_or_default();

    if title.is_empty() {
        return Err(ValidationError::single("title", "Title is required"));
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::single(
            "title",
            "Title must not exceed 200 characters",
        ));
    }

    Ok(title.to_string())
}

/// Validates a task description.
///
/// A blank description is stored as no description.
///
/// # Errors
///
/// Returns a `ValidationError` if the description exceeds 5000 characters.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(description) = description.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };

    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::single(
            "description",
            "Description must not exceed 5000 characters",
        ));
    }

    Ok(Some(description.to_string()))
}

/// Validates a due date.
///
/// Accepts an ISO 8601 date or date-time and keeps the calendar day it
/// names. A blank value means no due date.
///
/// # Errors
///
/// Returns a `ValidationError` if the value is not ISO 8601.
pub fn validate_due_date(due_date: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match due_date.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => parse_iso8601_date(text).map(Some).ok_or_else(|| {
            ValidationError::single("due_date", "Due date must be an ISO 8601 date")
        }),
    }
}

/// Validates a status.
///
/// # Errors
///
/// Returns a `ValidationError` if the value is not a known status.
pub fn validate_status(status: Option<&str>) -> Result<Option<TaskStatus>, ValidationError> {
    status
        .map(|text| {
            TaskStatus::parse(text).ok_or_else(|| ValidationError::single("status", "Invalid status"))
        })
        .transpose()
}

/// Validates a whole request, collecting every field error.
///
/// # Errors
///
/// Returns a `ValidationError` listing all invalid fields.
pub fn validate_task_request(request: &TaskRequest) -> Result<TaskDraft, ValidationError> {
    let title = validate_title(request.title.as_deref());
    let description = validate_description(request.description.as_deref());
    let due_date = validate_due_date(request.due_date.as_deref());
    let status = validate_status(request.status.as_deref());

    match (title, description, due_date, status) {
        (Ok(title), Ok(description), Ok(due_date), Ok(status)) => Ok(TaskDraft {
            title,
            description,
            due_date,
            status,
        }),
        (title, description, due_date, status) => {
            let errors: Vec<FieldError> = [
                title.err(),
                description.err(),
                due_date.err(),
                status.err(),
            ]
            .into_iter()
            .flatten()
            .flat_map(|error| error.errors)
            .collect();
            Err(ValidationError::new(errors))
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
