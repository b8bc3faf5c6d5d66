//! Audit store port.

use crate::task::domain::AuditRecord;
use async_trait::async_trait;

use super::TaskListenerError;

/// Append-only store for audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListenerError::Storage`] when the record could not be
    /// written.
    async fn append(&self, record: AuditRecord) -> Result<(), TaskListenerError>;

    /// Returns every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListenerError::Storage`] when the store cannot be read.
    async fn records(&self) -> Result<Vec<AuditRecord>, TaskListenerError>;
}
