//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{OwnerId, Task, TaskFilter, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Keeps an insertion-order index so filtered queries return tasks in
/// creation order, matching the `PostgreSQL` adapter's `created_at`
/// ordering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Returns the stored task when it exists and belongs to the owner.
fn find_owned(state: &InMemoryTaskState, owner: OwnerId, id: TaskId) -> Option<&Task> {
    state
        .tasks
        .get(&id)
        .filter(|task| task.owner_id() == owner)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if find_owned(&state, task.owner_id(), task.id()).is_none() {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(find_owned(&state, owner, id).cloned())
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if find_owned(&state, owner, id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.tasks.remove(&id);
        state.insertion_order.retain(|entry| *entry != id);
        Ok(())
    }

    async fn find_filtered(
        &self,
        owner: OwnerId,
        filter: &TaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let matches = state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| task.owner_id() == owner && filter.matches(task))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn find_due_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut due: Vec<Task> = state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| task.due_date() >= from && task.due_date() <= to)
            .cloned()
            .collect();
        due.sort_by_key(Task::due_date);
        Ok(due)
    }
}
