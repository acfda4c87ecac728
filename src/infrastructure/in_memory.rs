//! In-memory repository implementation.
//!
//! Suitable for development and tests. State lives behind a
//! `tokio::sync::RwLock`; ids come from a counter that is never rewound, so
//! a deleted id is not handed out again.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskDraft, TaskId, Timestamp};
use crate::infrastructure::{RepositoryError, TaskRepository};

#[derive(Debug)]
struct Store {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Store {
    const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTaskRepository::new();
/// let task = repository.insert(&TaskDraft::new("My task")).await?;
/// assert_eq!(task.id, TaskId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let mut store = self.store.write().await;
        let id = TaskId::new(store.next_id);
        store.next_id += 1;

        let task = Task::from_draft(id, draft.clone(), Timestamp::now());
        store.tasks.insert(id, task.clone());
        drop(store);
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.tasks.values().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.tasks.get(&id).cloned())
    }

    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError> {
        let mut store = self.store.write().await;
        let Some(existing) = store.tasks.remove(&id) else {
            return Ok(None);
        };

        let updated = existing.apply(draft.clone());
        store.tasks.insert(id, updated.clone());
        drop(store);
        Ok(Some(updated))
    }

    async fn delete(&self, id: TaskId) -> Result<bool, RepositoryError> {
        let mut store = self.store.write().await;
        Ok(store.tasks.remove(&id).is_some())
    }
}

// =============================================================================
// Tests
// =============================================================================
