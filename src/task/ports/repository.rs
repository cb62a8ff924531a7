//! Repository port for owner-scoped task persistence and lookup.

use crate::task::domain::{OwnerId, Task, TaskFilter, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every lookup and mutation except [`TaskRepository::find_due_between`] is
/// scoped to a single owner; a task belonging to another owner behaves
/// exactly like a missing one.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task, matched by identifier and
    /// owner. Last write wins; no concurrency token is checked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task matches both
    /// the identifier and the owner.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within the owner's scope.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// owner.
    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task within the owner's scope. Deletion is permanent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when zero records were
    /// affected.
    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns the owner's tasks matching the filter, in creation order.
    async fn find_filtered(
        &self,
        owner: OwnerId,
        filter: &TaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks across all owners whose due date falls inside the
    /// inclusive range, ordered by due date. Used by the reminder scan.
    async fn find_due_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// No task matched the identifier within the owner's scope.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
