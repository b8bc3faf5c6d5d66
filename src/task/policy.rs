//! Task policy: normalisation, validation, status transitions, and
//! due-date-driven priority escalation.
//!
//! The policy is stateless apart from its escalation window and is safe to
//! share across threads. Every rule that depends on the current time takes
//! `now` explicitly so callers can evaluate a whole batch against one
//! instant.
//!
//! Two notions of "past" coexist on purpose: due-date validation rejects
//! dates before the start of the current calendar day in the caller's time
//! zone, while [`TaskPolicy::is_overdue`] compares against the exact
//! instant.

use crate::task::domain::{
    Task, TaskDraft, TaskPriority, TaskStatus, TaskValidationError, ValidatedTask,
};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};

/// Default escalation window in hours.
pub const DEFAULT_ESCALATION_WINDOW_HOURS: i64 = 24;

/// Rules applied to every task mutation and evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPolicy {
    escalation_window_hours: i64,
}

impl Default for TaskPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ESCALATION_WINDOW_HOURS)
    }
}

impl TaskPolicy {
    /// Creates a policy that escalates tasks due within the given number of
    /// hours.
    #[must_use]
    pub const fn new(escalation_window_hours: i64) -> Self {
        Self {
            escalation_window_hours,
        }
    }

    /// Returns the escalation window in hours.
    #[must_use]
    pub const fn escalation_window_hours(&self) -> i64 {
        self.escalation_window_hours
    }

    /// Trims and canonicalises a draft so it is safe to validate.
    ///
    /// Status and priority are trimmed and uppercased; title and assignee are
    /// trimmed. Absent fields are left untouched, so normalising twice is the
    /// same as normalising once.
    #[must_use]
    pub fn normalize(&self, mut draft: TaskDraft) -> TaskDraft {
        draft.status = draft.status.map(|status| status.trim().to_ascii_uppercase());
        draft.priority = draft
            .priority
            .map(|priority| priority.trim().to_ascii_uppercase());
        draft.title = draft.title.map(|title| title.trim().to_owned());
        draft.assignee = draft.assignee.map(|assignee| assignee.trim().to_owned());
        draft
    }

    /// Fills in `OPEN` status and `MEDIUM` priority when absent.
    #[must_use]
    pub fn apply_defaults(&self, mut draft: TaskDraft) -> TaskDraft {
        if draft.status.is_none() {
            draft.status = Some(TaskStatus::Open.as_str().to_owned());
        }
        if draft.priority.is_none() {
            draft.priority = Some(TaskPriority::Medium.as_str().to_owned());
        }
        draft
    }

    /// Validates a draft for creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] for a blank title,
    /// [`TaskValidationError::DueDateInPast`] for a due date before the start
    /// of `now`'s day, and [`TaskValidationError::InvalidStatus`] or
    /// [`TaskValidationError::InvalidPriority`] for unknown enum values.
    pub fn validate_for_create<Tz: TimeZone>(
        &self,
        draft: &TaskDraft,
        now: &DateTime<Tz>,
    ) -> Result<ValidatedTask, TaskValidationError> {
        let title = draft
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(TaskValidationError::EmptyTitle)?;
        self.validate_due_date(draft.due_date, now)?;
        let status = draft
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or(TaskStatus::Open);
        let priority = parse_priority(draft)?;

        Ok(validated(draft, title.to_owned(), status, priority))
    }

    /// Validates an incoming draft against the task it replaces.
    ///
    /// A blank incoming title keeps the existing title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DueDateInPast`] for a past due date,
    /// [`TaskValidationError::InvalidStatusTransition`] when the status change
    /// is illegal or the requested status is absent or unknown, and
    /// [`TaskValidationError::InvalidPriority`] for an unknown priority.
    pub fn validate_for_update<Tz: TimeZone>(
        &self,
        existing: &Task,
        incoming: &TaskDraft,
        now: &DateTime<Tz>,
    ) -> Result<ValidatedTask, TaskValidationError> {
        self.validate_due_date(incoming.due_date, now)?;

        let from = existing.status();
        let requested = incoming.status.as_deref();
        let to = requested.and_then(|raw| TaskStatus::try_from(raw).ok());
        let status = match to {
            Some(target) if self.valid_transition(Some(from), Some(target)) => target,
            _ => {
                return Err(TaskValidationError::InvalidStatusTransition {
                    from: from.as_str().to_owned(),
                    to: to.map_or_else(
                        || requested.unwrap_or("unset").to_owned(),
                        |target| target.as_str().to_owned(),
                    ),
                });
            }
        };
        let priority = parse_priority(incoming)?;

        let title = incoming
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| existing.title());

        Ok(validated(incoming, title.to_owned(), status, priority))
    }

    /// Returns `true` when moving between the given statuses is legal.
    ///
    /// Absent statuses are never legal.
    #[must_use]
    pub fn valid_transition(&self, from: Option<TaskStatus>, to: Option<TaskStatus>) -> bool {
        match (from, to) {
            (Some(current), Some(target)) => current.can_transition_to(target),
            _ => false,
        }
    }

    /// Rejects due dates before the start of `now`'s calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DueDateInPast`] when `due_date` is
    /// strictly earlier than local midnight of `now`.
    pub fn validate_due_date<Tz: TimeZone>(
        &self,
        due_date: Option<DateTime<Utc>>,
        now: &DateTime<Tz>,
    ) -> Result<(), TaskValidationError> {
        match due_date {
            Some(due) if due < start_of_day(now) => Err(TaskValidationError::DueDateInPast),
            _ => Ok(()),
        }
    }

    /// Returns `true` when the task has a due date strictly before `now` and
    /// is not done.
    #[must_use]
    pub fn is_overdue(&self, task: &Task, now: DateTime<Utc>) -> bool {
        task.status() != TaskStatus::Done && task.due_date().is_some_and(|due| due < now)
    }

    /// Returns the priority the task should carry at `now`.
    ///
    /// Done tasks and tasks without a due date keep their priority. Overdue
    /// tasks are raised to at least `HIGH`. Tasks due within the escalation
    /// window move up exactly one step per evaluation.
    ///
    /// Hours to due are counted in whole hours truncated toward zero, so a
    /// task less than one hour overdue still counts as inside the window
    /// and moves up one step rather than jumping to `HIGH`.
    #[must_use]
    pub fn escalated_priority(&self, task: &Task, now: DateTime<Utc>) -> TaskPriority {
        let current = task.priority();
        let Some(due) = task.due_date() else {
            return current;
        };
        if task.status() == TaskStatus::Done {
            return current;
        }

        let hours_to_due = due.signed_duration_since(now).num_hours();
        if hours_to_due < 0 {
            return current.max(TaskPriority::High);
        }
        if hours_to_due <= self.escalation_window_hours {
            return current.raised();
        }
        current
    }
}

fn parse_priority(draft: &TaskDraft) -> Result<TaskPriority, TaskValidationError> {
    Ok(draft
        .priority
        .as_deref()
        .map(TaskPriority::try_from)
        .transpose()?
        .unwrap_or(TaskPriority::Medium))
}

fn validated(
    draft: &TaskDraft,
    title: String,
    status: TaskStatus,
    priority: TaskPriority,
) -> ValidatedTask {
    ValidatedTask {
        title,
        description: draft.description.clone(),
        status,
        priority,
        due_date: draft.due_date,
        assignee: draft
            .assignee
            .as_deref()
            .map(str::trim)
            .filter(|assignee| !assignee.is_empty())
            .map(str::to_owned),
        owner: draft.owner.clone(),
    }
}

/// Returns the instant of midnight at the start of `now`'s calendar day.
fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    now.timezone().from_local_datetime(&midnight).earliest().map_or_else(
        || Utc.from_utc_datetime(&midnight),
        |start| start.with_timezone(&Utc),
    )
}
