//! Error types for task validation, permissions, and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned when a task payload fails policy validation.
///
/// Every variant is recoverable: the caller rejects the request with the
/// rendered message and never retries automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is absent or blank after trimming.
    #[error("title is required")]
    EmptyTitle,

    /// The due date falls before the start of the current day.
    #[error("due date cannot be in the past")]
    DueDateInPast,

    /// The status string does not name a known status.
    #[error("unknown task status: {0}")]
    InvalidStatus(String),

    /// The priority string does not name a known priority.
    #[error("unknown task priority: {0}")]
    InvalidPriority(String),

    /// The requested status change is not permitted by the state machine.
    #[error("invalid status transition {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status in canonical string form.
        from: String,
        /// Requested status as supplied (canonical when it parsed).
        to: String,
    },
}

/// Errors returned when an actor may not perform a task mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// The actor neither owns the task nor holds administrator rights.
    #[error("user '{actor}' may not modify task {task_id}")]
    NotOwner {
        /// Acting user name.
        actor: String,
        /// Task the actor attempted to access.
        task_id: TaskId,
    },

    /// The operation is restricted to administrators.
    #[error("user '{actor}' is not an administrator")]
    AdminOnly {
        /// Acting user name.
        actor: String,
    },
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

impl From<ParseTaskStatusError> for TaskValidationError {
    fn from(err: ParseTaskStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}

impl From<ParseTaskPriorityError> for TaskValidationError {
    fn from(err: ParseTaskPriorityError) -> Self {
        Self::InvalidPriority(err.0)
    }
}
