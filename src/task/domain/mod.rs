//! Domain model for task lifecycle management.
//!
//! The task domain models owner-scoped task records, their three-state
//! status machine, partial updates, and filter predicates while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod filter;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use filter::{GroupedTasks, TaskFilter};
pub use ids::{OwnerId, TaskId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskPatch, TaskTitle};
