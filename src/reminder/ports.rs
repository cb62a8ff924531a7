//! Port contracts for reminder delivery.

use crate::task::domain::OwnerId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Resolves an owner identifier to a contact email address.
///
/// Backed by the external identity subsystem; the reminder service only
/// needs this one lookup from it.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    /// Returns the owner's email address, or `None` when the directory has
    /// no address on record.
    async fn email_for(&self, owner: OwnerId) -> Result<Option<String>, DirectoryError>;
}

/// Outbound mail contract.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message. No retry is attempted by callers.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Failure while resolving an owner's contact details.
#[derive(Debug, Clone, Error)]
#[error("owner directory lookup failed: {0}")]
pub struct DirectoryError(Arc<dyn std::error::Error + Send + Sync>);

impl DirectoryError {
    /// Wraps an underlying lookup error.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Failure while handing a message to the mail transport.
#[derive(Debug, Clone, Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(Arc<dyn std::error::Error + Send + Sync>);

impl MailError {
    /// Wraps an underlying transport error.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
