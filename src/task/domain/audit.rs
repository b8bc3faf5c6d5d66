//! Audit trail records derived from task events.

use super::{TaskEvent, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the task audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// When the record was written.
    pub at: DateTime<Utc>,
    /// Event kind, for example `TASK_UPDATED`.
    pub kind: String,
    /// User that caused the event.
    pub actor: String,
    /// Affected task.
    pub task_id: TaskId,
    /// Human-readable summary.
    pub details: String,
}

impl AuditRecord {
    /// Builds the audit record for an event observed at `at`.
    #[must_use]
    pub fn from_event(event: &TaskEvent, at: DateTime<Utc>) -> Self {
        let details = match event {
            TaskEvent::TaskCreated { .. } => "created".to_owned(),
            TaskEvent::TaskUpdated {
                from_status,
                to_status,
                ..
            } => format!("{from_status} -> {to_status}"),
            TaskEvent::TaskDeleted { .. } => "deleted".to_owned(),
        };
        Self {
            at,
            kind: event.kind().to_owned(),
            actor: event.actor().to_owned(),
            task_id: event.task_id(),
            details,
        }
    }
}
