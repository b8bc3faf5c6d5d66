//! Shared fixtures for unit tests.

use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wednesday 2026-10-21 12:00 UTC; its week starts on Monday 2026-10-19.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0)
        .single()
        .expect("valid reference time")
}

/// Returns `reference_now()` shifted by `hours`.
pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    reference_now() + TimeDelta::hours(hours)
}

/// Builds a persisted task with the given attributes.
pub fn stored_task(
    owner: &str,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
) -> Task {
    let created_at = reference_now() - TimeDelta::days(30);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: format!("{owner} task"),
        description: None,
        status,
        priority,
        due_date,
        assignee: None,
        owner: owner.to_owned(),
        created_at,
        updated_at: created_at,
    })
}

/// Builds a persisted task with an assignee.
pub fn assigned_task(owner: &str, assignee: Option<&str>, status: TaskStatus) -> Task {
    let created_at = reference_now() - TimeDelta::days(30);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: format!("{owner} task"),
        description: None,
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        assignee: assignee.map(str::to_owned),
        owner: owner.to_owned(),
        created_at,
        updated_at: created_at,
    })
}
