//! Domain model for the task tracker.
//!
//! Tasks enter the system as untrusted [`TaskDraft`] payloads and leave the
//! policy layer as typed [`Task`] aggregates. Infrastructure concerns stay
//! outside of the domain boundary.

mod audit;
mod error;
mod event;
mod ids;
mod status;
mod task;

pub use audit::AuditRecord;
pub use error::{
    ParseTaskPriorityError, ParseTaskStatusError, PermissionError, TaskValidationError,
};
pub use event::TaskEvent;
pub use ids::{Actor, TaskId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, ValidatedTask};
