//! Tests for filter predicates and the grouped board view.

use crate::task::domain::{
    GroupedTasks, OwnerId, Task, TaskDomainError, TaskFilter, TaskStatus, TaskTitle,
};
use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn task_with(title: &str, status: TaskStatus, due: DateTime<Utc>) -> Task {
    Task::new(
        OwnerId::new(),
        TaskTitle::new(title).expect("valid title"),
        None,
        due,
        Some(status),
        &DefaultClock,
    )
}

#[fixture]
fn report_task() -> Task {
    task_with("Finish Report", TaskStatus::ToDo, instant(2025, 6, 15))
}

#[fixture]
fn milk_task() -> Task {
    task_with("Buy milk", TaskStatus::ToDo, instant(2025, 6, 20))
}

#[rstest]
fn empty_filter_matches_everything(report_task: Task, milk_task: Task) {
    let filter = TaskFilter::new();
    assert!(filter.matches(&report_task));
    assert!(filter.matches(&milk_task));
}

#[rstest]
fn title_filter_is_case_insensitive_substring(report_task: Task, milk_task: Task) {
    let filter = TaskFilter::new().with_title_contains("report");
    assert!(filter.matches(&report_task));
    assert!(!filter.matches(&milk_task));
}

#[rstest]
fn status_filter_matches_exactly(report_task: Task) {
    assert!(TaskFilter::new()
        .with_status(TaskStatus::ToDo)
        .matches(&report_task));
    assert!(!TaskFilter::new()
        .with_status(TaskStatus::Done)
        .matches(&report_task));
}

#[rstest]
fn due_date_bounds_are_inclusive(report_task: Task) {
    let due = report_task.due_date();
    let filter = TaskFilter::new().with_due_from(due).with_due_to(due);
    assert!(filter.matches(&report_task));

    let excluded = TaskFilter::new().with_due_from(due + chrono::Duration::seconds(1));
    assert!(!excluded.matches(&report_task));
}

#[rstest]
fn validate_rejects_inverted_range() {
    let from = instant(2025, 6, 30);
    let to = instant(2025, 6, 1);
    let filter = TaskFilter::new().with_due_from(from).with_due_to(to);
    assert_eq!(
        filter.validate(),
        Err(TaskDomainError::InvalidDateRange { from, to })
    );
}

#[rstest]
fn validate_accepts_equal_bounds() {
    let bound = instant(2025, 6, 1);
    let filter = TaskFilter::new().with_due_from(bound).with_due_to(bound);
    assert_eq!(filter.validate(), Ok(()));
}

#[rstest]
fn validate_accepts_single_sided_bounds() {
    assert_eq!(
        TaskFilter::new()
            .with_due_from(instant(2025, 6, 30))
            .validate(),
        Ok(())
    );
    assert_eq!(
        TaskFilter::new().with_due_to(instant(2025, 6, 1)).validate(),
        Ok(())
    );
}

#[rstest]
fn grouped_always_has_three_columns() {
    let grouped = GroupedTasks::from_tasks(Vec::new());
    for status in TaskStatus::ALL {
        assert!(grouped.tasks_in(status).is_empty());
    }
    assert!(grouped.is_empty());
}

#[rstest]
fn grouped_partitions_by_status_preserving_order() {
    let first = task_with("First", TaskStatus::ToDo, instant(2025, 6, 1));
    let second = task_with("Second", TaskStatus::Done, instant(2025, 6, 2));
    let third = task_with("Third", TaskStatus::ToDo, instant(2025, 6, 3));
    let tasks = vec![first.clone(), second.clone(), third.clone()];

    let grouped = GroupedTasks::from_tasks(tasks.clone());

    assert_eq!(grouped.tasks_in(TaskStatus::ToDo), &[first, third]);
    assert_eq!(grouped.tasks_in(TaskStatus::Done), &[second]);
    assert!(grouped.tasks_in(TaskStatus::InProgress).is_empty());
    assert_eq!(grouped.len(), tasks.len());
}

#[rstest]
fn grouped_concatenation_is_permutation_of_input() {
    let tasks = vec![
        task_with("A", TaskStatus::InProgress, instant(2025, 6, 1)),
        task_with("B", TaskStatus::Done, instant(2025, 6, 2)),
        task_with("C", TaskStatus::ToDo, instant(2025, 6, 3)),
        task_with("D", TaskStatus::Done, instant(2025, 6, 4)),
    ];
    let grouped = GroupedTasks::from_tasks(tasks.clone());

    let mut recombined: Vec<Task> = TaskStatus::ALL
        .into_iter()
        .flat_map(|status| grouped.tasks_in(status).to_vec())
        .collect();
    recombined.sort_by_key(|task| task.id().into_inner());
    let mut expected = tasks;
    expected.sort_by_key(|task| task.id().into_inner());
    assert_eq!(recombined, expected);
}

#[rstest]
fn grouped_serialises_with_literal_status_keys() {
    let grouped = GroupedTasks::from_tasks(vec![task_with(
        "Only",
        TaskStatus::ToDo,
        instant(2025, 6, 1),
    )]);
    let value = serde_json::to_value(&grouped).expect("grouped view should serialise");
    let object = value.as_object().expect("grouped view is an object");

    assert_eq!(object.len(), 3);
    assert!(object.contains_key("To Do"));
    assert!(object.contains_key("In Progress"));
    assert!(object.contains_key("Done"));
}
