//! Reminder scan and digest delivery.

use super::ports::{DirectoryError, Mailer, OwnerDirectory};
use crate::task::domain::{OwnerId, Task};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use chrono::Duration;
use minijinja::{Environment, context};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::MissedTickBehavior;

/// Plain-text digest body listing one task per line.
const DIGEST_TEMPLATE: &str = "You have tasks due within {{ window }}:\n\
{% for task in tasks %}- {{ task.title }}: due at {{ task.due }}\n{% endfor %}";

/// Errors surfaced by the reminder scan.
///
/// Individual mail failures are not in this taxonomy: they are logged and
/// skipped, since the digest is a best-effort notification.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Due-task lookup failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Owner email resolution failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Digest body rendering failed.
    #[error("failed to render reminder digest: {0}")]
    Template(#[from] minijinja::Error),
}

/// Outcome of one reminder scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderRunReport {
    /// Tasks found inside the look-ahead window.
    pub tasks_due: usize,
    /// Digests successfully handed to the mail transport.
    pub emails_sent: usize,
    /// Owners skipped because no email address is on record.
    pub owners_skipped: usize,
}

/// Periodic due-soon reminder service.
pub struct ReminderService<R, D, M, C>
where
    R: TaskRepository,
    D: OwnerDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    mailer: Arc<M>,
    clock: Arc<C>,
    window: Duration,
}

impl<R, D, M, C> ReminderService<R, D, M, C>
where
    R: TaskRepository,
    D: OwnerDirectory,
    M: Mailer,
    C: Clock + Send + Sync,
{
    /// Creates a reminder service with a one-hour look-ahead window.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, mailer: Arc<M>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            mailer,
            clock,
            window: Duration::hours(1),
        }
    }

    /// Overrides the look-ahead window.
    #[must_use]
    pub const fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Runs one scan: finds tasks due inside `[now, now + window]`, groups
    /// them per owner in first-seen order, and sends one digest per owner.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError`] when the due-task lookup, an owner
    /// lookup, or digest rendering fails. A mail transport failure for one
    /// owner is logged and does not fail the scan.
    pub async fn send_due_reminders(&self) -> Result<ReminderRunReport, ReminderError> {
        let now = self.clock.utc();
        let due = self.repository.find_due_between(now, now + self.window).await?;
        let mut report = ReminderRunReport {
            tasks_due: due.len(),
            ..ReminderRunReport::default()
        };
        if due.is_empty() {
            tracing::debug!("no tasks due soon");
            return Ok(report);
        }

        let phrase = window_phrase(self.window);
        let subject = format!("You have tasks due within {phrase}");
        for (owner, tasks) in group_by_owner(due) {
            let Some(email) = self.directory.email_for(owner).await? else {
                tracing::warn!(%owner, "owner has no email address, reminder skipped");
                report.owners_skipped += 1;
                continue;
            };
            let body = render_digest(&tasks, &phrase)?;
            match self.mailer.send(&email, &subject, &body).await {
                Ok(()) => {
                    tracing::info!(%owner, tasks = tasks.len(), "reminder digest sent");
                    report.emails_sent += 1;
                }
                Err(err) => {
                    tracing::warn!(%owner, error = %err, "reminder delivery failed");
                }
            }
        }
        Ok(report)
    }

    /// Drives [`ReminderService::send_due_reminders`] on a fixed period,
    /// logging scan failures and continuing. Never returns; callers spawn
    /// it as a background job.
    pub async fn run(&self, period: std::time::Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.send_due_reminders().await {
                Ok(report) if report.tasks_due > 0 => {
                    tracing::info!(
                        tasks_due = report.tasks_due,
                        emails_sent = report.emails_sent,
                        "reminder scan complete"
                    );
                }
                Ok(_) => {}
                Err(err) => tracing::error!(error = %err, "reminder scan failed"),
            }
        }
    }
}

/// One rendered digest line.
#[derive(Debug, Serialize)]
struct DigestEntry {
    title: String,
    due: String,
}

fn render_digest(tasks: &[Task], window: &str) -> Result<String, minijinja::Error> {
    let entries: Vec<DigestEntry> = tasks
        .iter()
        .map(|task| DigestEntry {
            title: task.title().as_str().to_owned(),
            due: task.due_date().format("%Y-%m-%d %H:%M UTC").to_string(),
        })
        .collect();
    Environment::new().render_str(DIGEST_TEMPLATE, context! { tasks => entries, window })
}

/// Phrases the look-ahead window for the digest subject and preamble, such
/// as "the next hour" or "the next 2 days".
fn window_phrase(window: Duration) -> String {
    let days = window.num_days();
    if days >= 1 && Duration::days(days) == window {
        return if days == 1 {
            "the next day".to_owned()
        } else {
            format!("the next {days} days")
        };
    }
    let hours = window.num_hours();
    if hours >= 1 && Duration::hours(hours) == window {
        return if hours == 1 {
            "the next hour".to_owned()
        } else {
            format!("the next {hours} hours")
        };
    }
    let minutes = window.num_minutes();
    format!("the next {minutes} minutes")
}

/// Groups tasks by owner, preserving first-seen owner order and task order
/// within each owner.
fn group_by_owner(tasks: Vec<Task>) -> Vec<(OwnerId, Vec<Task>)> {
    let mut order: Vec<OwnerId> = Vec::new();
    let mut buckets: HashMap<OwnerId, Vec<Task>> = HashMap::new();
    for task in tasks {
        let owner = task.owner_id();
        let bucket = buckets.entry(owner).or_default();
        if bucket.is_empty() {
            order.push(owner);
        }
        bucket.push(task);
    }

    let mut grouped = Vec::with_capacity(order.len());
    for owner in order {
        if let Some(bucket) = buckets.remove(&owner) {
            grouped.push((owner, bucket));
        }
    }
    grouped
}
