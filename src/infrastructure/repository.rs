//! Repository trait for tasks.
//!
//! The trait is object safe so the backend can be selected at runtime and
//! shared as `Arc<dyn TaskRepository>`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Task, TaskDraft, TaskId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be mapped to a task.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

// =============================================================================
// Task Repository
// =============================================================================

/// Storage for tasks.
///
/// Missing rows are not errors: lookups return `None` and deletes return
/// `false`, leaving the HTTP layer to decide on a 404.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns it with its assigned id.
    ///
    /// A draft without a status is stored as pending.
    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError>;

    /// Lists all tasks, newest (highest id) first.
    async fn list(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Finds a task by its id.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Replaces a task's fields.
    ///
    /// Title, description and due date are overwritten; the status is kept
    /// when the draft has none. Returns `Ok(None)` if the task does not exist.
    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError>;

    /// Deletes a task.
    ///
    /// Returns `Ok(true)` if the task was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: TaskId) -> Result<bool, RepositoryError>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_repository_error_display() {
        let error = RepositoryError::DatabaseError("connection refused".to_string());
        assert_eq!(format!("{error}"), "Database error: connection refused");

        let error = RepositoryError::CorruptRow("unknown status 'archived'".to_string());
        assert_eq!(format!("{error}"), "Corrupt row: unknown status 'archived'");
    }

    #[rstest]
    fn test_repository_error_from_sqlx() {
        let error: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, RepositoryError::DatabaseError(_)));
    }
}
