//! Shared world state for task command BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingEventSink},
    domain::Task,
    policy::TaskPolicy,
    services::{TaskCommandError, TaskCommandService},
};

/// Service type used by the BDD world.
pub type TestCommandService =
    TaskCommandService<InMemoryTaskRepository, RecordingEventSink, DefaultClock>;

/// Scenario world for task command behaviour tests.
pub struct TaskCommandWorld {
    pub service: TestCommandService,
    pub repository: Arc<InMemoryTaskRepository>,
    pub events: Arc<RecordingEventSink>,
    pub last_task: Option<Task>,
    pub last_error: Option<TaskCommandError>,
}

impl TaskCommandWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let events = Arc::new(RecordingEventSink::new());
        let service = TaskCommandService::new(
            Arc::clone(&repository),
            Arc::clone(&events),
            Arc::new(DefaultClock),
            TaskPolicy::default(),
        );

        Self {
            service,
            repository,
            events,
            last_task: None,
            last_error: None,
        }
    }

    /// Returns the task the scenario is working with.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskCommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCommandWorld {
    TaskCommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
