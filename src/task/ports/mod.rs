//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod events;
pub mod repository;

pub use events::{TaskEvent, TaskEventPublisher};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
