//! In-memory owner directory for tests and lightweight wiring.

use super::ports::{DirectoryError, OwnerDirectory};
use crate::task::domain::OwnerId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe in-memory mapping from owner to email address.
#[derive(Debug, Default)]
pub struct InMemoryOwnerDirectory {
    entries: RwLock<HashMap<OwnerId, String>>,
}

impl InMemoryOwnerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an owner's email address, replacing any previous entry.
    pub fn register(&self, owner: OwnerId, email: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(owner, email.into());
        }
    }
}

#[async_trait]
impl OwnerDirectory for InMemoryOwnerDirectory {
    async fn email_for(&self, owner: OwnerId) -> Result<Option<String>, DirectoryError> {
        let entries = self
            .entries
            .read()
            .map_err(|err| DirectoryError::new(std::io::Error::other(err.to_string())))?;
        Ok(entries.get(&owner).cloned())
    }
}
