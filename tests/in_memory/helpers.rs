//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Actor, Task, TaskDraft},
    policy::TaskPolicy,
    ports::{TaskEventSink, TaskRepository},
    services::TaskCommandService,
};

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

/// Wednesday 2026-10-21 12:00 UTC.
///
/// # Panics
///
/// Never panics for the hard-coded date.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 21, 12, 0, 0)
        .single()
        .expect("valid reference time")
}

/// Returns the reference instant shifted by `hours`.
#[must_use]
pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    reference_now() + TimeDelta::hours(hours)
}

/// Provides a clock frozen at [`reference_now`].
#[fixture]
pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(reference_now()))
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Creates a task through the command service.
///
/// # Errors
///
/// Returns an error if the command is rejected.
pub async fn create_task<R, E>(
    service: &TaskCommandService<R, E, FixedClock>,
    draft: TaskDraft,
    owner: &str,
) -> Result<Task, eyre::Report>
where
    R: TaskRepository,
    E: TaskEventSink,
{
    service
        .create(draft, &Actor::user(owner))
        .await
        .map_err(|err| eyre::eyre!("create task for {owner}: {err}"))
}

/// Builds a command service with the default policy.
#[must_use]
pub fn command_service<E: TaskEventSink>(
    repository: &Arc<InMemoryTaskRepository>,
    events: Arc<E>,
    clock: &Arc<FixedClock>,
) -> TaskCommandService<InMemoryTaskRepository, E, FixedClock> {
    TaskCommandService::new(
        Arc::clone(repository),
        events,
        Arc::clone(clock),
        TaskPolicy::default(),
    )
}
