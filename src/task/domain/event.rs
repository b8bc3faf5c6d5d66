//! Domain events emitted after successful task mutations.

use super::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A task mutation that downstream listeners may react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEvent {
    /// A task was created.
    TaskCreated {
        /// Identifier of the new task.
        task_id: TaskId,
        /// User that created it.
        actor: String,
    },
    /// A task was updated.
    TaskUpdated {
        /// Identifier of the updated task.
        task_id: TaskId,
        /// User that updated it.
        actor: String,
        /// Status before the update.
        from_status: TaskStatus,
        /// Status after the update.
        to_status: TaskStatus,
    },
    /// A task was deleted.
    TaskDeleted {
        /// Identifier of the deleted task.
        task_id: TaskId,
        /// User that deleted it.
        actor: String,
    },
}

impl TaskEvent {
    /// Returns the canonical event kind name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => "TASK_CREATED",
            Self::TaskUpdated { .. } => "TASK_UPDATED",
            Self::TaskDeleted { .. } => "TASK_DELETED",
        }
    }

    /// Returns the affected task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::TaskCreated { task_id, .. }
            | Self::TaskUpdated { task_id, .. }
            | Self::TaskDeleted { task_id, .. } => *task_id,
        }
    }

    /// Returns the acting user.
    #[must_use]
    pub fn actor(&self) -> &str {
        match self {
            Self::TaskCreated { actor, .. }
            | Self::TaskUpdated { actor, .. }
            | Self::TaskDeleted { actor, .. } => actor,
        }
    }
}
