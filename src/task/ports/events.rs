//! Best-effort change-broadcast port.

use crate::task::domain::{Task, TaskId};
use serde::Serialize;

/// A change notification for interested viewers of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TaskEvent {
    /// The task was created or mutated; carries the full record.
    TaskUpdated(Task),
    /// The task was deleted.
    TaskDeleted(TaskId),
}

impl TaskEvent {
    /// Returns the identifier of the task the event concerns.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::TaskUpdated(task) => task.id(),
            Self::TaskDeleted(id) => *id,
        }
    }
}

/// Fire-and-forget broadcast of task changes.
///
/// Delivery is at-most-once with no acknowledgment or retry; publish
/// failures must never fail the originating mutation, so the contract is
/// infallible. Implementations log and drop undeliverable events.
pub trait TaskEventPublisher: Send + Sync {
    /// Publishes a change event to whoever is currently subscribed.
    fn publish(&self, event: TaskEvent);
}
