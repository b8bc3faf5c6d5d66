//! Analytics, escalation sweep, and overdue queries over shared state.

use std::sync::Arc;

use super::helpers::{
    FixedClock, clock, command_service, create_task, hours_from_now, repository,
};
use rstest::rstest;
use taskboard::analytics::{AnalyticsCache, AnalyticsEngine, AnalyticsService, cache_key};
use taskboard::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingEventSink},
    domain::{Actor, TaskDraft, TaskPriority, TaskStatus},
    policy::TaskPolicy,
    ports::TaskRepository,
    services::{EscalationSweep, TaskQueryService},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_escalation_is_visible_in_refreshed_report(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let events = Arc::new(RecordingEventSink::new());
    let commands = command_service(&repository, Arc::clone(&events), &clock);
    let cache = Arc::new(AnalyticsCache::new(
        AnalyticsEngine::default(),
        Arc::clone(&clock),
    ));
    let analytics = AnalyticsService::new(Arc::clone(&repository), Arc::clone(&cache));
    let sweep = EscalationSweep::new(
        Arc::clone(&repository),
        Arc::clone(&cache),
        Arc::clone(&clock),
        TaskPolicy::default(),
    );
    let alice = Actor::user("alice");

    create_task(
        &commands,
        TaskDraft::new("Due soon")
            .with_priority("LOW")
            .with_due_date(hours_from_now(6)),
        "alice",
    )
    .await?;
    create_task(
        &commands,
        TaskDraft::new("Later")
            .with_priority("LOW")
            .with_due_date(hours_from_now(24 * 10)),
        "alice",
    )
    .await?;
    create_task(&commands, TaskDraft::new("Someone else's"), "bob").await?;

    let before = analytics.for_actor(&alice).await?;
    eyre::ensure!(before.report.total == 2, "alice sees only her tasks");
    eyre::ensure!(
        before.report.priorities.get(&TaskPriority::Low) == Some(&2),
        "both tasks start low"
    );

    let outcome = sweep.run().await?;
    eyre::ensure!(outcome.escalated == 1, "one task is inside the window");
    eyre::ensure!(
        cache.get(&cache_key(&alice)).is_none(),
        "sweep should invalidate cached reports"
    );

    let after = analytics.for_actor(&alice).await?;
    eyre::ensure!(
        after.report.priorities.get(&TaskPriority::Medium) == Some(&1),
        "escalated task should be medium"
    );
    eyre::ensure!(events.events().len() == 3, "sweep publishes no events");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_match_report_counts(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let commands = command_service(&repository, Arc::new(RecordingEventSink::new()), &clock);
    let queries = TaskQueryService::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
        TaskPolicy::default(),
    );
    let cache = Arc::new(AnalyticsCache::new(
        AnalyticsEngine::default(),
        Arc::clone(&clock),
    ));
    let analytics = AnalyticsService::new(Arc::clone(&repository), cache);
    let admin = Actor::admin("root");

    let task = create_task(
        &commands,
        TaskDraft::new("Stand-up").with_due_date(hours_from_now(1)),
        "alice",
    )
    .await?;
    create_task(&commands, TaskDraft::new("No deadline"), "bob").await?;

    let later = Arc::new(FixedClock(hours_from_now(3)));
    let late_queries = TaskQueryService::new(
        Arc::clone(&repository),
        Arc::clone(&later),
        TaskPolicy::default(),
    );
    let overdue_now = queries.overdue(&admin).await?;
    let overdue_later = late_queries.overdue(&admin).await?;
    eyre::ensure!(overdue_now.is_empty(), "nothing is overdue yet");
    eyre::ensure!(
        overdue_later.iter().map(|found| found.id()).eq([task.id()]),
        "only the stand-up is overdue later"
    );

    let stored = repository.find_all().await?;
    eyre::ensure!(
        stored.iter().all(|found| found.status() == TaskStatus::Open),
        "tasks default to open"
    );
    let report = analytics.for_actor(&admin).await?;
    eyre::ensure!(report.report.overdue == 0, "report uses the service clock");
    Ok(())
}
