//! Per-task change broadcasting over in-process channels.
//!
//! One shared [`TaskChangeHub`] is constructed at wiring time and handed to
//! both the task service (as its event publisher) and any viewers that want
//! push updates. Delivery is best-effort and at-most-once: a viewer that is
//! briefly disconnected simply misses the events sent in between.

use crate::task::domain::TaskId;
use crate::task::ports::{TaskEvent, TaskEventPublisher};
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Buffered events retained per task channel before old ones are dropped.
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Shared hub of per-task broadcast channels.
///
/// Subscriptions are keyed by task identifier; dropping the returned
/// [`TaskSubscription`] unsubscribes. Channels with no remaining
/// subscribers are pruned on the next publish for their key.
#[derive(Debug)]
pub struct TaskChangeHub {
    capacity: usize,
    channels: RwLock<HashMap<TaskId, broadcast::Sender<TaskEvent>>>,
}

impl TaskChangeHub {
    /// Creates a hub with the default per-task channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a hub with an explicit per-task channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribes to change events for one task.
    ///
    /// Events published before the subscription was created are not
    /// delivered. Dropping the handle unsubscribes.
    #[must_use]
    pub fn subscribe(&self, task_id: TaskId) -> TaskSubscription {
        let receiver = match self.channels.write() {
            Ok(mut channels) => channels
                .entry(task_id)
                .or_insert_with(|| broadcast::channel(self.capacity).0)
                .subscribe(),
            // A poisoned map still serves existing receivers; hand out a
            // channel that is already closed rather than panic.
            Err(poisoned) => {
                tracing::warn!(%task_id, "task change hub lock poisoned");
                poisoned
                    .into_inner()
                    .get(&task_id)
                    .map_or_else(|| broadcast::channel(1).0.subscribe(), |s| s.subscribe())
            }
        };
        TaskSubscription { task_id, receiver }
    }

    /// Returns the number of live subscribers for a task.
    #[must_use]
    pub fn subscriber_count(&self, task_id: TaskId) -> usize {
        self.channels
            .read()
            .map(|channels| {
                channels
                    .get(&task_id)
                    .map_or(0, broadcast::Sender::receiver_count)
            })
            .unwrap_or(0)
    }
}

impl Default for TaskChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskEventPublisher for TaskChangeHub {
    fn publish(&self, event: TaskEvent) {
        let task_id = event.task_id();
        let Ok(mut channels) = self.channels.write() else {
            tracing::warn!(%task_id, "task change hub lock poisoned, event dropped");
            return;
        };
        let prune = match channels.get(&task_id) {
            None => return,
            Some(sender) if sender.receiver_count() == 0 => true,
            Some(sender) => {
                if sender.send(event).is_err() {
                    tracing::debug!(%task_id, "no live subscriber, task event dropped");
                }
                false
            }
        };
        if prune {
            channels.remove(&task_id);
        }
    }
}

/// Live subscription to one task's change events.
///
/// Dropping the subscription unsubscribes from the hub.
#[derive(Debug)]
pub struct TaskSubscription {
    task_id: TaskId,
    receiver: broadcast::Receiver<TaskEvent>,
}

impl TaskSubscription {
    /// Returns the task this subscription watches.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Waits for the next change event.
    ///
    /// Returns `None` once the hub has been dropped and all buffered events
    /// are consumed. Events missed while the subscriber lagged behind the
    /// channel capacity are skipped silently, keeping at-most-once
    /// semantics.
    pub async fn next(&mut self) -> Option<TaskEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(task_id = %self.task_id, skipped, "subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
