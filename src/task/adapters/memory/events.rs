//! Event sink that records published events.

use std::sync::{Arc, Mutex};

use crate::task::{domain::TaskEvent, ports::TaskEventSink};

/// Event sink that keeps every published event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<TaskEvent>>>,
}

impl RecordingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events published so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl TaskEventSink for RecordingEventSink {
    fn publish(&self, event: TaskEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
