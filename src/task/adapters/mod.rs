//! Adapter implementations of the task ports.

pub mod broadcast;
pub mod memory;
pub mod postgres;
