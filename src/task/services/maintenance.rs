//! Periodic priority escalation sweep.
//!
//! The sweep walks every task, raises priorities according to
//! [`TaskPolicy::escalated_priority`], and persists each change on its own.
//! No lock is held across the task set, so the sweep can run alongside live
//! commands. When anything changed the analytics cache is cleared so stale
//! reports are not served.

use crate::analytics::AnalyticsCache;
use crate::task::{
    policy::TaskPolicy,
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Summary of one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Number of tasks evaluated.
    pub examined: usize,
    /// Number of tasks whose priority was raised.
    pub escalated: usize,
}

/// Background job escalating task priorities as due dates approach.
pub struct EscalationSweep<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    cache: Arc<AnalyticsCache<C>>,
    clock: Arc<C>,
    policy: TaskPolicy,
}

impl<R, C> EscalationSweep<R, C>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a sweep.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        cache: Arc<AnalyticsCache<C>>,
        clock: Arc<C>,
        policy: TaskPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            clock,
            policy,
        }
    }

    /// Runs one sweep.
    ///
    /// Each task moves at most one escalation step per run, so the effective
    /// escalation speed depends on how often the sweep is scheduled.
    ///
    /// # Errors
    ///
    /// Returns the repository error when tasks cannot be listed or saved.
    /// Tasks saved before the failure stay escalated.
    pub async fn run(&self) -> TaskRepositoryResult<SweepOutcome> {
        let now = self.clock.utc();
        let tasks = self.repository.find_all().await?;
        let mut outcome = SweepOutcome {
            examined: tasks.len(),
            escalated: 0,
        };

        for mut task in tasks {
            let current = task.priority();
            let escalated = self.policy.escalated_priority(&task, now);
            if escalated <= current {
                continue;
            }
            task.escalate_to(escalated, self.clock.utc());
            let saved = self.repository.save(task).await?;
            outcome.escalated += 1;
            tracing::debug!(
                task_id = ?saved.id(),
                from = %current,
                to = %escalated,
                "task priority escalated"
            );
        }

        if outcome.escalated > 0 {
            self.cache.clear();
        }
        tracing::info!(
            examined = outcome.examined,
            escalated = outcome.escalated,
            "escalation sweep finished"
        );
        Ok(outcome)
    }

    /// Runs the sweep every `period` on the current tokio runtime.
    ///
    /// The first run happens after one full period. A failed run is logged
    /// and the schedule continues.
    #[must_use]
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticks = tokio::time::interval_at(start, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if let Err(err) = self.run().await {
                    tracing::warn!(error = %err, "escalation sweep failed");
                }
            }
        })
    }
}
