//! Command pipeline tests with event fan-out to audit and cache listeners.

use std::num::NonZeroUsize;
use std::sync::Arc;

use super::helpers::{
    FixedClock, clock, command_service, create_task, hours_from_now, repository,
};
use rstest::rstest;
use taskboard::analytics::{
    ADMIN_KEY, AnalyticsCache, AnalyticsEngine, CacheInvalidationListener,
};
use taskboard::task::{
    adapters::{
        audit::AuditTrailListener,
        dispatch::EventDispatcher,
        memory::{InMemoryAuditStore, InMemoryTaskRepository},
    },
    domain::{Actor, TaskDraft, TaskPriority, TaskStatus},
    ports::{AuditStore, TaskEventListener, TaskRepository},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mutations_reach_audit_trail_and_invalidate_cache(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let audit = Arc::new(InMemoryAuditStore::new());
    let cache = Arc::new(AnalyticsCache::new(
        AnalyticsEngine::default(),
        Arc::clone(&clock),
    ));
    let listeners: Vec<Arc<dyn TaskEventListener>> = vec![
        Arc::new(AuditTrailListener::new(Arc::clone(&audit), Arc::clone(&clock))),
        Arc::new(CacheInvalidationListener::new(Arc::clone(&cache))),
    ];
    let capacity = NonZeroUsize::new(16).ok_or_else(|| eyre::eyre!("zero capacity"))?;
    let (dispatcher, worker) = EventDispatcher::spawn(capacity, listeners);
    let service = command_service(&repository, Arc::new(dispatcher), &clock);

    cache.get_or_compute(ADMIN_KEY, &[]);
    let created = create_task(
        &service,
        TaskDraft::new("Prepare release").with_due_date(hours_from_now(72)),
        "alice",
    )
    .await?;
    let id = created.id().ok_or_else(|| eyre::eyre!("created task has no id"))?;
    service
        .update(
            id,
            TaskDraft::new("Prepare release").with_status("IN_PROGRESS"),
            &Actor::user("alice"),
        )
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished before update"))?;
    service.delete(id, &Actor::admin("root")).await?;

    drop(service);
    worker.await?;

    let records = audit.records().await?;
    let kinds: Vec<_> = records.iter().map(|record| record.kind.as_str()).collect();
    eyre::ensure!(
        kinds == ["TASK_CREATED", "TASK_UPDATED", "TASK_DELETED"],
        "unexpected audit kinds {kinds:?}"
    );
    let details: Vec<_> = records.iter().map(|record| record.details.as_str()).collect();
    eyre::ensure!(
        details.get(1) == Some(&"OPEN -> IN_PROGRESS"),
        "unexpected update details {details:?}"
    );
    eyre::ensure!(cache.is_empty(), "cache should be invalidated");
    eyre::ensure!(
        repository.find_by_id(id).await?.is_none(),
        "task should be deleted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_through_done(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<FixedClock>,
) -> Result<(), eyre::Report> {
    let capacity = NonZeroUsize::new(4).ok_or_else(|| eyre::eyre!("zero capacity"))?;
    let (dispatcher, worker) = EventDispatcher::spawn(capacity, Vec::new());
    let service = command_service(&repository, Arc::new(dispatcher), &clock);
    let alice = Actor::user("alice");

    let created = create_task(
        &service,
        TaskDraft::new("Write notes").with_priority("low"),
        "alice",
    )
    .await?;
    let id = created.id().ok_or_else(|| eyre::eyre!("created task has no id"))?;

    for status in ["IN_PROGRESS", "DONE"] {
        service
            .update(id, TaskDraft::from(&created).with_status(status), &alice)
            .await?
            .ok_or_else(|| eyre::eyre!("task vanished during {status}"))?;
    }
    let reopen = service
        .update(id, TaskDraft::from(&created).with_status("OPEN"), &alice)
        .await;

    let stored = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(stored.status() == TaskStatus::Done, "task should be done");
    eyre::ensure!(stored.priority() == TaskPriority::Low, "priority changed");
    eyre::ensure!(reopen.is_err(), "reopening a done task should fail");

    drop(service);
    worker.await?;
    Ok(())
}
