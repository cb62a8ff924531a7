//! In-memory adapters for tests and lightweight wiring.

mod task;

pub use task::InMemoryTaskRepository;
