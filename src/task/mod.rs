//! Task lifecycle management for ZigTask.
//!
//! This module implements the task query and lifecycle engine: creating
//! owner-scoped task records, applying partial updates and status
//! transitions, deleting tasks, building filter predicates from optional
//! query parameters, and partitioning results into the three-column board
//! view. Ownership mismatches are deliberately indistinguishable from
//! missing records so callers cannot probe which identifiers exist. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
