//! Unit tests for the task module.

mod filter_tests;
mod service_tests;
