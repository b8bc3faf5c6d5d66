//! Read-side task views scoped to the acting user.

use crate::task::{
    domain::{Actor, PermissionError, Task, TaskId},
    policy::TaskPolicy,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task queries.
#[derive(Debug, Error)]
pub enum TaskQueryError {
    /// The actor may not read the task.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task query operations.
pub type TaskQueryResult<T> = Result<T, TaskQueryError>;

/// Task query service.
#[derive(Clone)]
pub struct TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, C> TaskQueryService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, policy: TaskPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Lists every task for administrators and the actor's own tasks
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when lookup fails.
    pub async fn list(&self, actor: &Actor) -> TaskQueryResult<Vec<Task>> {
        let tasks = if actor.is_admin() {
            self.repository.find_all().await?
        } else {
            self.repository.find_by_owner(actor.name()).await?
        };
        Ok(tasks)
    }

    /// Retrieves one task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Permission`] when a non-administrator asks
    /// for another user's task, or [`TaskQueryError::Repository`] when lookup
    /// fails.
    pub async fn get(&self, id: TaskId, actor: &Actor) -> TaskQueryResult<Option<Task>> {
        let Some(task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        if !actor.may_modify(task.owner()) {
            return Err(PermissionError::NotOwner {
                actor: actor.name().to_owned(),
                task_id: id,
            }
            .into());
        }
        Ok(Some(task))
    }

    /// Lists the visible tasks that are overdue right now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError::Repository`] when lookup fails.
    pub async fn overdue(&self, actor: &Actor) -> TaskQueryResult<Vec<Task>> {
        let now = self.clock.utc();
        let tasks = self.list(actor).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| self.policy.is_overdue(task, now))
            .collect())
    }
}
