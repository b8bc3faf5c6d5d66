//! Port contracts for the task tracker.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod audit;
pub mod events;
pub mod repository;

pub use audit::AuditStore;
pub use events::{TaskEventListener, TaskEventSink, TaskListenerError};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use events::MockTaskEventSink;
#[cfg(test)]
pub use repository::MockTaskRepository;
