//! Service layer for task creation, update, and deletion.
//!
//! These commands are the only path by which tasks are mutated: each one
//! applies the policy, stamps timestamps, persists through the repository,
//! and publishes the matching event.

use crate::task::{
    domain::{Actor, PermissionError, Task, TaskDraft, TaskEvent, TaskId, TaskValidationError},
    policy::TaskPolicy,
    ports::{TaskEventSink, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task commands.
#[derive(Debug, Error)]
pub enum TaskCommandError {
    /// No acting user was supplied.
    #[error("acting user is required")]
    MissingActor,
    /// The payload failed policy validation.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// The actor may not perform the operation.
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task command operations.
pub type TaskCommandResult<T> = Result<T, TaskCommandError>;

/// Task mutation orchestration service.
#[derive(Clone)]
pub struct TaskCommandService<R, E, C>
where
    R: TaskRepository,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<E>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, E, C> TaskCommandService<R, E, C>
where
    R: TaskRepository,
    E: TaskEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new command service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        events: Arc<E>,
        clock: Arc<C>,
        policy: TaskPolicy,
    ) -> Self {
        Self {
            repository,
            events,
            clock,
            policy,
        }
    }

    /// Creates a task owned by the acting user.
    ///
    /// Any identifier or owner on the draft is discarded. Missing status and
    /// priority default to `OPEN` and `MEDIUM`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::MissingActor`] for a blank actor name,
    /// [`TaskCommandError::Validation`] when the draft is invalid, or
    /// [`TaskCommandError::Repository`] when persistence fails.
    pub async fn create(&self, draft: TaskDraft, actor: &Actor) -> TaskCommandResult<Task> {
        let actor_name = require_actor(actor)?;

        let mut normalized = self.policy.normalize(draft);
        normalized.id = None;
        normalized.owner = Some(actor_name.to_owned());
        let prepared = self.policy.apply_defaults(normalized);
        let fields = self
            .policy
            .validate_for_create(&prepared, &self.clock.local())?;

        let now = self.clock.utc();
        let task = Task::from_validated(fields, actor_name, now, now);
        let saved = self.repository.save(task).await?;
        let task_id = saved.id().ok_or(TaskRepositoryError::MissingIdentifier)?;

        tracing::info!(%task_id, actor = actor_name, "task created");
        self.events.publish(TaskEvent::TaskCreated {
            task_id,
            actor: actor_name.to_owned(),
        });
        Ok(saved)
    }

    /// Replaces the task `id` with the validated draft.
    ///
    /// Returns `Ok(None)` when no task has the identifier. Non-administrators
    /// may only update their own tasks and cannot reassign ownership; an
    /// administrator draft without an owner keeps the existing one. The
    /// creation timestamp is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::Permission`] when the actor is neither the
    /// owner nor an administrator, [`TaskCommandError::Validation`] for an
    /// invalid draft or illegal status transition, and
    /// [`TaskCommandError::Repository`] when persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        draft: TaskDraft,
        actor: &Actor,
    ) -> TaskCommandResult<Option<Task>> {
        let actor_name = require_actor(actor)?;
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        if !actor.may_modify(existing.owner()) {
            return Err(PermissionError::NotOwner {
                actor: actor_name.to_owned(),
                task_id: id,
            }
            .into());
        }

        let mut normalized = self.policy.normalize(draft);
        normalized.id = Some(id);
        if !actor.is_admin() {
            normalized.owner = Some(actor_name.to_owned());
        }
        let prepared = self.policy.apply_defaults(normalized);
        let fields = self
            .policy
            .validate_for_update(&existing, &prepared, &self.clock.local())?;

        let owner = fields
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .unwrap_or_else(|| existing.owner())
            .to_owned();
        let task = Task::from_validated(fields, owner, existing.created_at(), self.clock.utc())
            .with_id(id);
        let saved = self.repository.save(task).await?;

        tracing::info!(
            task_id = %id,
            actor = actor_name,
            from = %existing.status(),
            to = %saved.status(),
            "task updated"
        );
        self.events.publish(TaskEvent::TaskUpdated {
            task_id: id,
            actor: actor_name.to_owned(),
            from_status: existing.status(),
            to_status: saved.status(),
        });
        Ok(Some(saved))
    }

    /// Deletes a task. Restricted to administrators.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::Permission`] for non-administrators and
    /// [`TaskCommandError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId, actor: &Actor) -> TaskCommandResult<()> {
        let actor_name = require_actor(actor)?;
        if !actor.is_admin() {
            return Err(PermissionError::AdminOnly {
                actor: actor_name.to_owned(),
            }
            .into());
        }

        self.repository.delete_by_id(id).await?;

        tracing::info!(task_id = %id, actor = actor_name, "task deleted");
        self.events.publish(TaskEvent::TaskDeleted {
            task_id: id,
            actor: actor_name.to_owned(),
        });
        Ok(())
    }
}

fn require_actor(actor: &Actor) -> TaskCommandResult<&str> {
    let name = actor.name().trim();
    if name.is_empty() {
        return Err(TaskCommandError::MissingActor);
    }
    Ok(name)
}
