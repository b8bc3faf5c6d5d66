//! Task aggregate and the untrusted payload it is built from.

use super::{TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Incoming task payload before normalisation and validation.
///
/// Status and priority are raw strings here; they become typed values only
/// once [`crate::task::policy::TaskPolicy`] has validated the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    /// Identifier supplied by the caller; ignored on create.
    pub id: Option<TaskId>,
    /// Task title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Requested status name.
    pub status: Option<String>,
    /// Requested priority name.
    pub priority: Option<String>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// User responsible for doing the task.
    pub assignee: Option<String>,
    /// Owning user; only honoured for administrators.
    pub owner: Option<String>,
}

impl TaskDraft {
    /// Creates a draft with a title and no other fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested status name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the requested priority name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Sets the owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: Some(task.title.clone()),
            description: task.description.clone(),
            status: Some(task.status.as_str().to_owned()),
            priority: Some(task.priority.as_str().to_owned()),
            due_date: task.due_date,
            assignee: task.assignee.clone(),
            owner: Some(task.owner.clone()),
        }
    }
}

/// Task fields that passed policy validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTask {
    /// Non-blank, trimmed title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Parsed status.
    pub status: TaskStatus,
    /// Parsed priority.
    pub priority: TaskPriority,
    /// Optional deadline, not before the start of the validation day.
    pub due_date: Option<DateTime<Utc>>,
    /// Assignee, absent when blank.
    pub assignee: Option<String>,
    /// Owner carried on the draft, if any.
    pub owner: Option<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: Option<TaskId>,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<String>,
    owner: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted assignee.
    pub assignee: Option<String>,
    /// Persisted owner.
    pub owner: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds an unsaved task from validated fields.
    ///
    /// The task has no identifier until a repository assigns one.
    #[must_use]
    pub fn from_validated(
        fields: ValidatedTask,
        owner: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            due_date: fields.due_date,
            assignee: fields.assignee,
            owner: owner.into(),
            created_at,
            updated_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: Some(data.id),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            assignee: data.assignee,
            owner: data.owner,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier, absent until persisted.
    #[must_use]
    pub const fn id(&self) -> Option<TaskId> {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the assignee.
    #[must_use]
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Raises the priority and records the modification time.
    #[expect(
        clippy::missing_const_for_fn,
        reason = "&mut self methods cannot be const in stable Rust"
    )]
    pub fn escalate_to(&mut self, priority: TaskPriority, at: DateTime<Utc>) {
        self.priority = priority;
        self.updated_at = at;
    }
}
