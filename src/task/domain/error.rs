//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The status value is not one of the three recognised literals.
    #[error("unknown task status: {0}")]
    InvalidStatus(String),

    /// The date value could not be parsed.
    #[error("invalid date value '{0}', expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),

    /// The lower filter bound is after the upper bound.
    #[error("'from' date {from} must not be after 'to' date {to}")]
    InvalidDateRange {
        /// Requested inclusive lower bound.
        from: DateTime<Utc>,
        /// Requested inclusive upper bound.
        to: DateTime<Utc>,
    },
}

/// Error returned while parsing status values from external input or
/// persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for TaskDomainError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}
