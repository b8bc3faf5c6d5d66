//! Non-blocking event fan-out.
//!
//! Commands publish and return immediately. Every registered listener owns a
//! bounded queue drained by its own background worker, so a slow listener
//! only backs up its own queue. Listener failures are logged and dropped, and
//! a full queue discards the event for that listener alone.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::{JoinHandle, JoinSet};

use crate::task::{
    domain::TaskEvent,
    ports::{TaskEventListener, TaskEventSink},
};

/// Event sink fanning out to one bounded queue per listener.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    routes: Arc<[Route]>,
    dropped: Arc<AtomicU64>,
}

#[derive(Debug)]
struct Route {
    listener: String,
    tx: mpsc::Sender<TaskEvent>,
}

impl EventDispatcher {
    /// Starts one worker per listener and returns the sink feeding them.
    ///
    /// Each listener gets a queue of `capacity` events. The returned handle
    /// completes once every worker has exited, which happens after every
    /// clone of the dispatcher has been dropped and the queues are drained.
    /// Aborting the handle stops all workers.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        capacity: NonZeroUsize,
        listeners: Vec<Arc<dyn TaskEventListener>>,
    ) -> (Self, JoinHandle<()>) {
        let mut workers = JoinSet::new();
        let mut routes = Vec::with_capacity(listeners.len());
        for listener in listeners {
            let (tx, rx) = mpsc::channel(capacity.get());
            routes.push(Route {
                listener: listener.name().to_owned(),
                tx,
            });
            workers.spawn(deliver(rx, listener));
        }

        let supervisor = tokio::spawn(async move {
            while let Some(joined) = workers.join_next().await {
                if let Err(err) = joined {
                    tracing::warn!(error = %err, "task event worker stopped");
                }
            }
        });
        let dispatcher = Self {
            routes: routes.into(),
            dropped: Arc::new(AtomicU64::new(0)),
        };
        (dispatcher, supervisor)
    }

    /// Returns how many listener deliveries were discarded because a queue
    /// was full or closed.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl TaskEventSink for EventDispatcher {
    fn publish(&self, event: TaskEvent) {
        for route in self.routes.iter() {
            let Err(err) = route.tx.try_send(event.clone()) else {
                continue;
            };
            self.dropped.fetch_add(1, Ordering::Relaxed);
            let reason = match err {
                TrySendError::Full(_) => "queue full",
                TrySendError::Closed(_) => "queue closed",
            };
            tracing::warn!(
                listener = route.listener.as_str(),
                kind = event.kind(),
                task_id = %event.task_id(),
                reason,
                "task event dropped"
            );
        }
    }
}

async fn deliver(mut rx: mpsc::Receiver<TaskEvent>, listener: Arc<dyn TaskEventListener>) {
    while let Some(event) = rx.recv().await {
        match listener.on_event(&event).await {
            Ok(()) => tracing::debug!(
                listener = listener.name(),
                kind = event.kind(),
                task_id = %event.task_id(),
                "task event delivered"
            ),
            Err(err) => tracing::warn!(
                listener = listener.name(),
                kind = event.kind(),
                task_id = %event.task_id(),
                error = %err,
                "task event listener failed"
            ),
        }
    }
}
