//! Due-soon reminder digests.
//!
//! Periodically scans for tasks whose due date falls inside a look-ahead
//! window, groups them per owner, resolves each owner's email address, and
//! sends one plain-text digest per owner. Delivery is best-effort: a failed
//! send is logged and skipped, never retried.

mod memory;
mod ports;
mod service;

pub use memory::InMemoryOwnerDirectory;
pub use ports::{DirectoryError, MailError, Mailer, OwnerDirectory};
pub use service::{ReminderError, ReminderRunReport, ReminderService};
