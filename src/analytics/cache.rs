//! Keyed store of the most recently computed analytics reports.
//!
//! [`AnalyticsCache::get_or_compute`] always recomputes and replaces the
//! entry for its key; the cache exists to expose a last-computed snapshot
//! and timestamp per key and to act as the invalidation point after
//! background mutations. Entries are only ever replaced whole, so readers
//! never observe a partial report. Two concurrent refreshes of one key may
//! both compute; the last write wins.

use super::{engine::AnalyticsEngine, report::TaskAnalytics};
use crate::task::{
    domain::{Task, TaskEvent},
    ports::{TaskEventListener, TaskListenerError},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A report together with the instant it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedReport {
    /// The computed report.
    pub report: Arc<TaskAnalytics>,
    /// When the report was computed.
    pub computed_at: DateTime<Utc>,
}

/// Write-through memo of analytics reports keyed by query.
pub struct AnalyticsCache<C: Clock> {
    engine: AnalyticsEngine,
    clock: Arc<C>,
    entries: RwLock<HashMap<String, CachedReport>>,
}

impl<C: Clock> AnalyticsCache<C> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(engine: AnalyticsEngine, clock: Arc<C>) -> Self {
        Self {
            engine,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Computes a report for `tasks` at the current time without storing it.
    #[must_use]
    pub fn compute(&self, tasks: &[Task]) -> TaskAnalytics {
        self.engine.compute(tasks, &self.clock.local())
    }

    /// Recomputes the report for `tasks`, stores it under `key`, and returns
    /// it.
    pub fn get_or_compute(&self, key: &str, tasks: &[Task]) -> CachedReport {
        let entry = CachedReport {
            report: Arc::new(self.compute(tasks)),
            computed_at: self.clock.utc(),
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), entry.clone());
        tracing::debug!(key, tasks = tasks.len(), "analytics report refreshed");
        entry
    }

    /// Returns the last report stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<CachedReport> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Removes the entry for `key`.
    pub fn evict(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clears an [`AnalyticsCache`] whenever a task mutation is observed.
pub struct CacheInvalidationListener<C: Clock> {
    cache: Arc<AnalyticsCache<C>>,
}

impl<C: Clock> CacheInvalidationListener<C> {
    /// Creates a listener invalidating `cache`.
    #[must_use]
    pub const fn new(cache: Arc<AnalyticsCache<C>>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl<C: Clock + Send + Sync + 'static> TaskEventListener for CacheInvalidationListener<C> {
    fn name(&self) -> &str {
        "analytics-cache"
    }

    async fn on_event(&self, _event: &TaskEvent) -> Result<(), TaskListenerError> {
        self.cache.clear();
        Ok(())
    }
}
