//! In-memory audit store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::AuditRecord,
    ports::{AuditStore, TaskListenerError},
};

/// Thread-safe append-only audit store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditStore {
    records: Arc<RwLock<Vec<AuditRecord>>>,
}

impl InMemoryAuditStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> TaskListenerError {
    TaskListenerError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, record: AuditRecord) -> Result<(), TaskListenerError> {
        let mut records = self.records.write().map_err(|err| poisoned(&err))?;
        records.push(record);
        Ok(())
    }

    async fn records(&self) -> Result<Vec<AuditRecord>, TaskListenerError> {
        let records = self.records.read().map_err(|err| poisoned(&err))?;
        Ok(records.clone())
    }
}
