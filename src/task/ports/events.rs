//! Event ports: the sink commands publish to and the listeners it feeds.

use crate::task::domain::TaskEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Fire-and-forget destination for task events.
///
/// Implementations must return promptly and must never fail the calling
/// mutation; delivery problems are handled inside the sink.
#[cfg_attr(test, mockall::automock)]
pub trait TaskEventSink: Send + Sync {
    /// Hands an event over for delivery.
    fn publish(&self, event: TaskEvent);
}

/// Downstream consumer of task events, such as an audit trail or webhook.
#[async_trait]
pub trait TaskEventListener: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListenerError`] when the listener could not process the
    /// event. The caller logs and discards it.
    async fn on_event(&self, event: &TaskEvent) -> Result<(), TaskListenerError>;
}

/// Errors raised by event listeners.
#[derive(Debug, Clone, Error)]
pub enum TaskListenerError {
    /// Delivery to an external endpoint failed.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Listener-side storage failed.
    #[error("storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskListenerError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
