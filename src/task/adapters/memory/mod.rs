//! In-memory adapters for tests and embedded use.

mod audit;
mod events;
mod task;

pub use audit::InMemoryAuditStore;
pub use events::RecordingEventSink;
pub use task::InMemoryTaskRepository;
