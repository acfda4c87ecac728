//! `PostgreSQL` repository implementation.
//!
//! Every operation is a single parameterized statement against one table.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS tasks (
//!     id BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     description TEXT,
//!     due_date DATE,
//!     status TEXT NOT NULL DEFAULT 'pending'
//!         CHECK (status IN ('pending', 'in-progress', 'done')),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! `due_date` is a `DATE`, so the calendar day chosen by the user round-trips
//! without any timezone conversion.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::{Task, TaskDraft, TaskId, TaskStatus, Timestamp};
use crate::infrastructure::{RepositoryError, TaskRepository};

/// DDL executed by [`PostgresTaskRepository::ensure_schema`].
pub const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (\
     id BIGSERIAL PRIMARY KEY, \
     title TEXT NOT NULL, \
     description TEXT, \
     due_date DATE, \
     status TEXT NOT NULL DEFAULT 'pending' \
         CHECK (status IN ('pending', 'in-progress', 'done')), \
     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()\
     )";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `tasks` row.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = TaskStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::CorruptRow(format!(
                "task {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: TaskId::new(row.id),
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

// =============================================================================
// PostgreSQL Task Repository
// =============================================================================

/// `PostgreSQL` implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/taskdb").await?;
/// let repository = PostgresTaskRepository::new(pool);
/// repository.ensure_schema().await?;
/// let task = repository.insert(&TaskDraft::new("My task")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    /// Connection pool for `PostgreSQL`.
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new `PostgreSQL` task repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let row: TaskRow = sqlx::query_as(
            "INSERT INTO tasks (title, description, due_date, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, due_date, status, created_at",
        )
        .bind(&draft.title)
        .bind(draft.description.as_deref())
        .bind(draft.due_date)
        .bind(draft.status.unwrap_or_default().as_str())
        .fetch_one(&self.pool)
        .await?;

        Task::try_from(row)
    }

    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, title, description, due_date, status, created_at \
             FROM tasks ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let row: Option<TaskRow> = sqlx::query_as(
            "SELECT id, title, description, due_date, status, created_at \
             FROM tasks WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError> {
        let row: Option<TaskRow> = sqlx::query_as(
            "UPDATE tasks \
             SET title = $1, description = $2, due_date = $3, status = COALESCE($4, status) \
             WHERE id = $5 \
             RETURNING id, title, description, due_date, status, created_at",
        )
        .bind(&draft.title)
        .bind(draft.description.as_deref())
        .bind(draft.due_date)
        .bind(draft.status.map(TaskStatus::as_str))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    async fn delete(&self, id: TaskId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(status: &str) -> TaskRow {
        TaskRow {
            id: 7,
            title: "Row task".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("pending", TaskStatus::Pending)]
    #[case("in-progress", TaskStatus::InProgress)]
    #[case("done", TaskStatus::Done)]
    fn test_task_row_conversion(#[case] status: &str, #[case] expected: TaskStatus) {
        let task = Task::try_from(row(status)).unwrap();
        assert_eq!(task.id, TaskId::new(7));
        assert_eq!(task.status, expected);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 20));
    }

    #[rstest]
    fn test_task_row_unknown_status_is_corrupt() {
        let result = Task::try_from(row("archived"));
        assert!(matches!(result, Err(RepositoryError::CorruptRow(_))));
    }

    #[rstest]
    fn test_schema_constrains_statuses() {
        for status in TaskStatus::ALL {
            assert!(SCHEMA.contains(&format!("'{}'", status.as_str())));
        }
    }

    // -------------------------------------------------------------------------
    // Integration Tests (require PostgreSQL)
    // -------------------------------------------------------------------------

    async fn connect() -> PostgresTaskRepository {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/taskdb_test".into());
        let pool = PgPool::connect(&database_url).await.unwrap();
        let repository = PostgresTaskRepository::new(pool);
        repository.ensure_schema().await.unwrap();
        repository
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "Requires PostgreSQL instance"]
    async fn test_postgres_insert_find_delete() {
        let repository = connect().await;

        let task = repository
            .insert(&TaskDraft::new("Postgres task").with_due_date(
                NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);

        let found = repository.find_by_id(task.id).await.unwrap();
        assert_eq!(found.map(|found| found.title), Some("Postgres task".to_string()));

        assert!(repository.delete(task.id).await.unwrap());
        assert!(!repository.delete(task.id).await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "Requires PostgreSQL instance"]
    async fn test_postgres_update_keeps_status_when_absent() {
        let repository = connect().await;

        let task = repository
            .insert(&TaskDraft::new("Before").with_status(TaskStatus::InProgress))
            .await
            .unwrap();

        let updated = repository
            .update(task.id, &TaskDraft::new("After"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.status, TaskStatus::InProgress);

        let _ = repository.delete(task.id).await;
    }

    #[rstest]
    #[tokio::test]
    #[ignore = "Requires PostgreSQL instance"]
    async fn test_postgres_list_is_newest_first() {
        let repository = connect().await;

        let older = repository.insert(&TaskDraft::new("Older")).await.unwrap();
        let newer = repository.insert(&TaskDraft::new("Newer")).await.unwrap();

        let listed = repository.list().await.unwrap();
        let position = |id: TaskId| listed.iter().position(|task| task.id == id);
        assert!(position(newer.id) < position(older.id));

        let _ = repository.delete(older.id).await;
        let _ = repository.delete(newer.id).await;
    }
}
