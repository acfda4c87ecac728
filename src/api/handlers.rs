//! HTTP handlers for the task CRUD routes.
//!
//! Each handler validates its input, performs a single repository call and
//! maps the outcome to a status code and JSON body.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{DeleteResponse, TaskRequest, TaskResponse, validate_task_request};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use crate::domain::TaskId;
use crate::infrastructure::TaskRepository;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// Holds a trait object so that `RepositoryFactory` can choose the backend
/// at runtime.
#[derive(Clone)]
pub struct AppState {
    /// Task repository for persistence.
    pub task_repository: Arc<dyn TaskRepository>,
}

impl AppState {
    /// Creates a new `AppState` around a repository.
    #[must_use]
    pub fn new(task_repository: Arc<dyn TaskRepository>) -> Self {
        Self { task_repository }
    }
}

/// Parses the `{id}` path segment.
pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    TaskId::parse(raw).ok_or_else(|| ApiErrorResponse::invalid_task_id(raw))
}

// =============================================================================
// POST /tasks Handler
// =============================================================================

/// Creates a new task.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Task title",
///   "description": "Optional description",
///   "due_date": "2026-10-20",
///   "status": "pending|in-progress|done"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: Task created successfully
/// - **400 Bad Request**: Validation error or unreadable JSON body
/// - **500 Internal Server Error**: Database error
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation or repository failure.
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<TaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiErrorResponse> {
    let draft = validate_task_request(&request)?;

    let task = state.task_repository.insert(&draft).await?;
    tracing::info!(task_id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// GET /tasks Handler
// =============================================================================

/// Lists every task, newest first.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the repository fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.task_repository.list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// GET /tasks/{id} Handler
// =============================================================================

/// Fetches a single task.
///
/// # Response
///
/// - **200 OK**: Task found
/// - **400 Bad Request**: `id` is not a positive integer
/// - **404 Not Found**: No task with that id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on a bad id, a missing task or repository failure.
pub async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = parse_task_id(&raw_id)?;

    state
        .task_repository
        .find_by_id(id)
        .await?
        .map(|task| Json(TaskResponse::from(task)))
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))
}

// =============================================================================
// PUT /tasks/{id} Handler
// =============================================================================

/// Replaces the editable fields of a task.
///
/// Title, description and due date are overwritten. The status is kept when
/// the request omits it.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on a bad id, validation failure, a missing
/// task or repository failure.
pub async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(request): JsonBody<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = parse_task_id(&raw_id)?;
    let draft = validate_task_request(&request)?;

    let task = state
        .task_repository
        .update(id, &draft)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))?;
    tracing::info!(task_id = %task.id, status = %task.status.as_str(), "Task updated");

    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /tasks/{id} Handler
// =============================================================================

/// Deletes a task.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on a bad id, a missing task or repository failure.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiErrorResponse> {
    let id = parse_task_id(&raw_id)?;

    if !state.task_repository.delete(id).await? {
        return Err(ApiErrorResponse::task_not_found(id));
    }
    tracing::info!(task_id = %id, "Task deleted");

    Ok(Json(DeleteResponse { success: true }))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
