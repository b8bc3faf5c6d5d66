//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Each call is an independent document write; the repository gives no
/// atomicity across a read followed by a save.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by `owner`.
    async fn find_by_owner(&self, owner: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Inserts or replaces a task and returns the stored value.
    ///
    /// Tasks without an identifier are assigned a fresh one.
    async fn save(&self, task: Task) -> TaskRepositoryResult<Task>;

    /// Removes a task. Removing an unknown identifier is not an error.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The store returned a task without an identifier.
    #[error("stored task has no identifier")]
    MissingIdentifier,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
