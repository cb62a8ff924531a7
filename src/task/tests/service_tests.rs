//! Service orchestration tests covering creation, mutation, filtering, and
//! the grouped board view.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{OwnerId, TaskDomainError, TaskId, TaskStatus},
    services::{CreateTaskRequest, TaskQuery, TaskService, TaskServiceError, UpdateTaskRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[fixture]
fn owner() -> OwnerId {
    OwnerId::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_status_defaults_to_to_do(service: TestService, owner: OwnerId) {
    let request = CreateTaskRequest::new("Buy groceries", "2025-07-01T12:00:00Z")
        .with_description("Milk, Bread, Eggs");
    let created = service
        .create(owner, request)
        .await
        .expect("creation should succeed");

    assert_eq!(created.status(), TaskStatus::ToDo);

    let fetched = service
        .find_by_id(owner, created.id())
        .await
        .expect("read-back should succeed");
    assert_eq!(fetched.title().as_str(), "Buy groceries");
    assert_eq!(fetched.description(), Some("Milk, Bread, Eggs"));
    assert_eq!(fetched.due_date(), created.due_date());
    assert_eq!(fetched.status(), TaskStatus::ToDo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_date_only_due_date(service: TestService, owner: OwnerId) {
    let created = service
        .create(owner, CreateTaskRequest::new("Date only", "2025-07-01"))
        .await
        .expect("creation should succeed");
    assert_eq!(created.due_date().to_rfc3339(), "2025-07-01T00:00:00+00:00");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_empty_title(service: TestService, owner: OwnerId) {
    let result = service
        .create(owner, CreateTaskRequest::new("   ", "2025-07-01"))
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unparseable_due_date(service: TestService, owner: OwnerId) {
    let result = service
        .create(owner, CreateTaskRequest::new("Bad date", "next tuesday"))
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(TaskDomainError::InvalidDate(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_status(service: TestService, owner: OwnerId) {
    let request = CreateTaskRequest::new("Bad status", "2025-07-01").with_status("Archived");
    let result = service.create(owner, request).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(
            TaskDomainError::InvalidStatus(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_present_fields(service: TestService, owner: OwnerId) {
    let created = service
        .create(
            owner,
            CreateTaskRequest::new("Original", "2025-07-01T12:00:00Z")
                .with_description("Keep me"),
        )
        .await
        .expect("creation should succeed");

    let updated = service
        .update(
            owner,
            created.id(),
            UpdateTaskRequest::new().with_title("Renamed"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.title().as_str(), "Renamed");
    assert_eq!(updated.description(), Some("Keep me"));
    assert_eq!(updated.due_date(), created.due_date());
    assert_eq!(updated.status(), created.status());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_reparses_due_date(service: TestService, owner: OwnerId) {
    let created = service
        .create(owner, CreateTaskRequest::new("Shift due date", "2025-07-01"))
        .await
        .expect("creation should succeed");

    let updated = service
        .update(
            owner,
            created.id(),
            UpdateTaskRequest::new().with_due_date("2025-08-15T09:30:00Z"),
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.due_date().to_rfc3339(), "2025-08-15T09:30:00+00:00");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_owner_mutations_report_not_found(service: TestService, owner: OwnerId) {
    let stranger = OwnerId::new();
    let created = service
        .create(owner, CreateTaskRequest::new("Private", "2025-07-01"))
        .await
        .expect("creation should succeed");

    let update = service
        .update(
            stranger,
            created.id(),
            UpdateTaskRequest::new().with_title("Hijacked"),
        )
        .await;
    assert!(matches!(update, Err(TaskServiceError::NotFound(_))));

    let remove = service.remove(stranger, created.id()).await;
    assert!(matches!(remove, Err(TaskServiceError::NotFound(_))));

    let read = service.find_by_id(stranger, created.id()).await;
    assert!(matches!(read, Err(TaskServiceError::NotFound(_))));

    // The owner still sees the untouched task.
    let fetched = service
        .find_by_id(owner, created.id())
        .await
        .expect("owner read should succeed");
    assert_eq!(fetched.title().as_str(), "Private");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_status_moves_task_between_columns(service: TestService, owner: OwnerId) {
    let created = service
        .create(owner, CreateTaskRequest::new("Movable", "2025-07-01"))
        .await
        .expect("creation should succeed");

    let toggled = service
        .toggle_status(owner, created.id(), "In Progress")
        .await
        .expect("toggle should succeed");
    assert_eq!(toggled.status(), TaskStatus::InProgress);

    let back = service
        .toggle_status(owner, created.id(), "To Do")
        .await
        .expect("any state may move to any other");
    assert_eq!(back.status(), TaskStatus::ToDo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_status_rejects_bogus_literal_and_leaves_task_unchanged(
    service: TestService,
    owner: OwnerId,
) {
    let created = service
        .create(owner, CreateTaskRequest::new("Stable", "2025-07-01"))
        .await
        .expect("creation should succeed");

    let result = service.toggle_status(owner, created.id(), "Bogus").await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(
            TaskDomainError::InvalidStatus(_)
        ))
    ));

    let fetched = service
        .find_by_id(owner, created.id())
        .await
        .expect("read should succeed");
    assert_eq!(fetched.status(), TaskStatus::ToDo);
    assert_eq!(fetched.updated_at(), created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_succeeds_once_then_reports_not_found(service: TestService, owner: OwnerId) {
    let created = service
        .create(owner, CreateTaskRequest::new("Disposable", "2025-07-01"))
        .await
        .expect("creation should succeed");

    service
        .remove(owner, created.id())
        .await
        .expect("first removal should succeed");
    let second = service.remove(owner, created.id()).await;
    assert!(matches!(second, Err(TaskServiceError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_of_unknown_id_reports_not_found(service: TestService, owner: OwnerId) {
    let result = service.remove(owner, TaskId::new()).await;
    assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_filtered_matches_title_substring_case_insensitively(
    service: TestService,
    owner: OwnerId,
) {
    service
        .create(owner, CreateTaskRequest::new("Finish Report", "2025-07-01"))
        .await
        .expect("creation should succeed");
    service
        .create(owner, CreateTaskRequest::new("Buy milk", "2025-07-02"))
        .await
        .expect("creation should succeed");

    let matches = service
        .find_filtered(owner, TaskQuery::new().with_title("report"))
        .await
        .expect("query should succeed");
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches.first().map(|task| task.title().as_str()),
        Some("Finish Report")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_filtered_applies_status_and_date_bounds(service: TestService, owner: OwnerId) {
    service
        .create(
            owner,
            CreateTaskRequest::new("June task", "2025-06-15").with_status("Done"),
        )
        .await
        .expect("creation should succeed");
    service
        .create(owner, CreateTaskRequest::new("July task", "2025-07-15"))
        .await
        .expect("creation should succeed");

    let june_done = service
        .find_filtered(
            owner,
            TaskQuery::new()
                .with_status("Done")
                .with_from("2025-06-01")
                .with_to("2025-06-30"),
        )
        .await
        .expect("query should succeed");
    assert_eq!(june_done.len(), 1);
    assert_eq!(
        june_done.first().map(|task| task.title().as_str()),
        Some("June task")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_filtered_rejects_inverted_range_before_querying(
    service: TestService,
    owner: OwnerId,
) {
    let result = service
        .find_filtered(
            owner,
            TaskQuery::new().with_from("2025-07-01").with_to("2025-06-01"),
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(
            TaskDomainError::InvalidDateRange { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_grouped_returns_all_columns_with_matching_tasks(
    service: TestService,
    owner: OwnerId,
) {
    let todo = service
        .create(owner, CreateTaskRequest::new("Pending", "2025-07-01"))
        .await
        .expect("creation should succeed");
    let done = service
        .create(
            owner,
            CreateTaskRequest::new("Finished", "2025-07-02").with_status("Done"),
        )
        .await
        .expect("creation should succeed");

    let grouped = service
        .find_grouped(owner, TaskQuery::new())
        .await
        .expect("grouped query should succeed");

    assert_eq!(grouped.tasks_in(TaskStatus::ToDo), &[todo]);
    assert!(grouped.tasks_in(TaskStatus::InProgress).is_empty());
    assert_eq!(grouped.tasks_in(TaskStatus::Done), &[done]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_grouped_is_permutation_of_find_filtered(service: TestService, owner: OwnerId) {
    for (title, status) in [
        ("One", "To Do"),
        ("Two", "In Progress"),
        ("Three", "Done"),
        ("Four", "To Do"),
    ] {
        service
            .create(
                owner,
                CreateTaskRequest::new(title, "2025-07-01").with_status(status),
            )
            .await
            .expect("creation should succeed");
    }

    let query = TaskQuery::new();
    let flat = service
        .find_filtered(owner, query.clone())
        .await
        .expect("flat query should succeed");
    let grouped = service
        .find_grouped(owner, query)
        .await
        .expect("grouped query should succeed");

    let mut recombined: Vec<_> = TaskStatus::ALL
        .into_iter()
        .flat_map(|status| grouped.tasks_in(status).to_vec())
        .map(|task| task.id().into_inner())
        .collect();
    recombined.sort_unstable();
    let mut expected: Vec<_> = flat.iter().map(|task| task.id().into_inner()).collect();
    expected.sort_unstable();
    assert_eq!(recombined, expected);
    assert_eq!(grouped.len(), flat.len());
}
