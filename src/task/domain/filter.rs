//! Filter predicates and the status-grouped board view.

use super::{Task, TaskDomainError, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Conjunctive filter over one owner's tasks.
///
/// Each field is optional; the effective predicate is built by folding over
/// only the fields that are present. Owner scoping is always applied by the
/// repository in addition to this filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    title_contains: Option<String>,
    status: Option<TaskStatus>,
    due_from: Option<DateTime<Utc>>,
    due_to: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Creates an empty filter matching every task of the owner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches titles containing the given fragment, case-insensitively.
    #[must_use]
    pub fn with_title_contains(mut self, fragment: impl Into<String>) -> Self {
        self.title_contains = Some(fragment.into());
        self
    }

    /// Matches the given status exactly.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Bounds the due date from below (inclusive).
    #[must_use]
    pub const fn with_due_from(mut self, from: DateTime<Utc>) -> Self {
        self.due_from = Some(from);
        self
    }

    /// Bounds the due date from above (inclusive).
    #[must_use]
    pub const fn with_due_to(mut self, to: DateTime<Utc>) -> Self {
        self.due_to = Some(to);
        self
    }

    /// Returns the title fragment, if any.
    #[must_use]
    pub fn title_contains(&self) -> Option<&str> {
        self.title_contains.as_deref()
    }

    /// Returns the status bound, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the inclusive lower due-date bound, if any.
    #[must_use]
    pub const fn due_from(&self) -> Option<DateTime<Utc>> {
        self.due_from
    }

    /// Returns the inclusive upper due-date bound, if any.
    #[must_use]
    pub const fn due_to(&self) -> Option<DateTime<Utc>> {
        self.due_to
    }

    /// Checks bound consistency.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when both bounds are
    /// present and the lower bound is after the upper bound.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if let (Some(from), Some(to)) = (self.due_from, self.due_to)
            && from > to
        {
            return Err(TaskDomainError::InvalidDateRange { from, to });
        }
        Ok(())
    }

    /// Evaluates the predicate against a single task.
    ///
    /// Used by the in-memory adapter; the `PostgreSQL` adapter translates
    /// the same semantics into SQL.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(fragment) = &self.title_contains {
            let title = task.title().as_str().to_lowercase();
            if !title.contains(&fragment.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status
            && task.status() != status
        {
            return false;
        }
        if let Some(from) = self.due_from
            && task.due_date() < from
        {
            return false;
        }
        if let Some(to) = self.due_to
            && task.due_date() > to
        {
            return false;
        }
        true
    }
}

/// One owner's tasks partitioned by status.
///
/// All three keys are always present; a status with no matching tasks maps
/// to an empty sequence rather than an absent key. Serialises with the
/// literal status keys (`"To Do"`, `"In Progress"`, `"Done"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedTasks {
    #[serde(rename = "To Do")]
    to_do: Vec<Task>,
    #[serde(rename = "In Progress")]
    in_progress: Vec<Task>,
    #[serde(rename = "Done")]
    done: Vec<Task>,
}

impl GroupedTasks {
    /// Partitions tasks into the three board columns, preserving order
    /// within each column.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut grouped = Self::default();
        for task in tasks {
            match task.status() {
                TaskStatus::ToDo => grouped.to_do.push(task),
                TaskStatus::InProgress => grouped.in_progress.push(task),
                TaskStatus::Done => grouped.done.push(task),
            }
        }
        grouped
    }

    /// Returns the tasks in the given column.
    #[must_use]
    pub fn tasks_in(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to_do.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when every column is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
