//! ZigTask: task query and lifecycle engine.
//!
//! This crate provides the core functionality behind a kanban-style task
//! board: owner-scoped task creation, partial update, deletion, status
//! transitions, filtered queries, and a status-grouped board view, plus
//! best-effort change broadcasting and due-soon email reminders.
//!
//! # Architecture
//!
//! ZigTask follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, channels)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, filtering, and grouped board views
//! - [`reminder`]: Periodic due-soon reminder digests

pub mod reminder;
pub mod task;
