//! Service layer for owner-scoped task creation, mutation, and queries.

use crate::task::{
    domain::{
        GroupedTasks, OwnerId, Task, TaskDomainError, TaskFilter, TaskId, TaskPatch, TaskStatus,
        TaskTitle,
    },
    ports::{TaskEvent, TaskEventPublisher, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Dates arrive as strings (RFC 3339 or `YYYY-MM-DD`) and statuses as their
/// display literals; the service validates both into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: String,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: due_date.into(),
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status literal. Omitted means `To Do`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Partial-update payload: only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement due date string.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the replacement status literal.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Optional query parameters for filtered and grouped reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    title: Option<String>,
    status: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

impl TaskQuery {
    /// Creates an empty query matching all of the owner's tasks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by case-insensitive title fragment.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Filters by exact status literal.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Bounds the due date from below (inclusive).
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Bounds the due date from above (inclusive).
    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed; the caller can correct the request.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task does not exist within the caller's scope. Missing and
    /// foreign-owned records are reported identically.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure, surfaced without retrying.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task query and lifecycle orchestration service.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    events: Option<Arc<dyn TaskEventPublisher>>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            events: self.events.clone(),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service without change broadcasting.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            events: None,
        }
    }

    /// Attaches a best-effort change publisher.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn TaskEventPublisher>) -> Self {
        self.events = Some(events);
        self
    }

    /// Creates a task owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the title is empty,
    /// the due date does not parse, or the status literal is unrecognised,
    /// and [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(
        &self,
        owner: OwnerId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let due_date = parse_instant(&request.due_date)?;
        let status = request
            .status
            .as_deref()
            .map(parse_status)
            .transpose()?;

        let task = Task::new(
            owner,
            title,
            request.description,
            due_date,
            status,
            &*self.clock,
        );
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier within the owner's scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task is missing or
    /// owned by someone else.
    pub async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<Task> {
        self.load_authorized(owner, id).await
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when a present field fails
    /// validation and [`TaskServiceError::NotFound`] when the task is
    /// missing or foreign-owned. Validation runs before the record is
    /// touched, so a failed request leaves the stored task unchanged.
    pub async fn update(
        &self,
        owner: OwnerId,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let mut patch = TaskPatch::new();
        if let Some(title) = request.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = request.description {
            patch = patch.with_description(description);
        }
        if let Some(due_date) = request.due_date {
            patch = patch.with_due_date(parse_instant(&due_date)?);
        }
        if let Some(status) = request.status {
            patch = patch.with_status(parse_status(&status)?);
        }
        self.apply_patch(owner, id, patch).await
    }

    /// Moves a task to another board column.
    ///
    /// Delegates to the update path with only the status set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the literal is not one
    /// of the three statuses (the stored task is untouched) and
    /// [`TaskServiceError::NotFound`] when the task is missing or
    /// foreign-owned.
    pub async fn toggle_status(
        &self,
        owner: OwnerId,
        id: TaskId,
        status: &str,
    ) -> TaskServiceResult<Task> {
        let parsed = parse_status(status)?;
        self.apply_patch(owner, id, TaskPatch::new().with_status(parsed))
            .await
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when zero records were
    /// affected; a repeated call therefore fails.
    pub async fn remove(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<()> {
        self.repository.delete(owner, id).await?;
        self.publish(TaskEvent::TaskDeleted(id));
        Ok(())
    }

    /// Returns the owner's tasks matching the query, in creation order.
    /// All matches are returned; no pagination is applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when a parameter does not
    /// parse or the date range is inverted; no repository call is made in
    /// that case.
    pub async fn find_filtered(
        &self,
        owner: OwnerId,
        query: TaskQuery,
    ) -> TaskServiceResult<Vec<Task>> {
        let filter = build_filter(query)?;
        Ok(self.repository.find_filtered(owner, &filter).await?)
    }

    /// Returns the owner's matching tasks partitioned into the three board
    /// columns. Every column is present even when empty.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TaskService::find_filtered`].
    pub async fn find_grouped(
        &self,
        owner: OwnerId,
        query: TaskQuery,
    ) -> TaskServiceResult<GroupedTasks> {
        let tasks = self.find_filtered(owner, query).await?;
        Ok(GroupedTasks::from_tasks(tasks))
    }

    /// Shared load-and-authorize step used by every mutation.
    async fn load_authorized(&self, owner: OwnerId, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn apply_patch(
        &self,
        owner: OwnerId,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskServiceResult<Task> {
        let mut task = self.load_authorized(owner, id).await?;
        task.apply(patch, &*self.clock);
        self.repository.update(&task).await?;
        self.publish(TaskEvent::TaskUpdated(task.clone()));
        Ok(task)
    }

    fn publish(&self, event: TaskEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

fn parse_status(value: &str) -> Result<TaskStatus, TaskDomainError> {
    TaskStatus::try_from(value).map_err(TaskDomainError::from)
}

/// Parses an RFC 3339 instant or a bare `YYYY-MM-DD` date.
///
/// Date-only values resolve to midnight UTC, matching how the existing API
/// interpreted both range bounds.
fn parse_instant(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidDate(value.to_owned()))
}

fn build_filter(query: TaskQuery) -> Result<TaskFilter, TaskDomainError> {
    let mut filter = TaskFilter::new();
    if let Some(title) = query.title {
        filter = filter.with_title_contains(title);
    }
    if let Some(status) = query.status {
        filter = filter.with_status(parse_status(&status)?);
    }
    if let Some(from) = query.from {
        filter = filter.with_due_from(parse_instant(&from)?);
    }
    if let Some(to) = query.to {
        filter = filter.with_due_to(parse_instant(&to)?);
    }
    filter.validate()?;
    Ok(filter)
}
