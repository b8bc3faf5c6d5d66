//! Listener that records task events in an audit store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::task::{
    domain::{AuditRecord, TaskEvent},
    ports::{AuditStore, TaskEventListener, TaskListenerError},
};

/// Appends an [`AuditRecord`] for every observed task event.
pub struct AuditTrailListener<S: AuditStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: AuditStore, C: Clock> AuditTrailListener<S, C> {
    /// Creates a listener writing to `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl<S, C> TaskEventListener for AuditTrailListener<S, C>
where
    S: AuditStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        "audit"
    }

    async fn on_event(&self, event: &TaskEvent) -> Result<(), TaskListenerError> {
        let record = AuditRecord::from_event(event, self.clock.utc());
        self.store.append(record).await
    }
}
