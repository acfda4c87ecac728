//! HTTP client for the task API.
//!
//! Wraps the five CRUD routes with typed requests and responses. Used by the
//! `taskflow` terminal board.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::api::{ApiError, DeleteResponse, TaskRequest, TaskResponse};
use crate::domain::{Task, TaskId, TaskStatus};

/// API address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Environment variable holding the API address.
pub const API_URL_ENV: &str = "TASKFLOW_API_URL";

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by [`TaskClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or decoding failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a structured error body.
    #[error("{status}: {error}")]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Decoded error body.
        error: ApiError,
    },

    /// The server answered with an unexpected status and body.
    #[error("unexpected response {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
}

impl ClientError {
    /// Returns `true` if the server reported the task as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. }
                if *status == StatusCode::NOT_FOUND
        )
    }
}

// =============================================================================
// Task Client
// =============================================================================

/// Typed client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    client: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    /// Creates a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Returns the API address.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        let tasks: Vec<TaskResponse> = decode(response).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn get_task(&self, id: TaskId) -> Result<Task, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, validation failure or
    /// any other non-success status.
    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task, ClientError> {
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(request)
            .send()
            .await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn update_task(&self, id: TaskId, request: &TaskRequest) -> Result<Task, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(request)
            .send()
            .await?;
        decode::<TaskResponse>(response).await.map(Task::from)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-success status.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await?;
        decode::<DeleteResponse>(response).await.map(|_| ())
    }

    /// Marks a task as done, keeping every other field.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either the read or the update fails.
    pub async fn mark_done(&self, id: TaskId) -> Result<Task, ClientError> {
        let task = self.get_task(id).await?;
        let request = TaskRequest::from(&task.with_status(TaskStatus::Done));
        self.update_task(id, &request).await
    }
}

/// Decodes a success body, or turns the response into a [`ClientError`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await?;
    match serde_json::from_str::<ApiError>(&body) {
        Ok(error) => Err(ClientError::Api { status, error }),
        Err(_) => Err(ClientError::UnexpectedStatus { status, body }),
    }
}

// =============================================================================
// Tests
// =============================================================================
