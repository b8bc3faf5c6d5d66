//! Per-actor analytics views.

use super::{
    cache::{AnalyticsCache, CachedReport},
    report::LegacyStats,
};
use crate::task::{
    domain::{Actor, Task},
    ports::{TaskRepository, TaskRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;

/// Cache key for the administrator-wide report.
pub const ADMIN_KEY: &str = "admin";

/// Returns the cache key used for `actor`'s report.
#[must_use]
pub fn cache_key(actor: &Actor) -> String {
    if actor.is_admin() {
        ADMIN_KEY.to_owned()
    } else {
        format!("me:{}", actor.name())
    }
}

/// Serves analytics over the tasks visible to an actor.
///
/// Administrators see every task; other users see the tasks they own.
#[derive(Clone)]
pub struct AnalyticsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    cache: Arc<AnalyticsCache<C>>,
}

impl<R, C> AnalyticsService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new analytics service.
    #[must_use]
    pub const fn new(repository: Arc<R>, cache: Arc<AnalyticsCache<C>>) -> Self {
        Self { repository, cache }
    }

    /// Refreshes and returns the cached report for `actor`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when tasks cannot be loaded.
    pub async fn for_actor(&self, actor: &Actor) -> TaskRepositoryResult<CachedReport> {
        let tasks = self.visible_tasks(actor).await?;
        Ok(self.cache.get_or_compute(&cache_key(actor), &tasks))
    }

    /// Computes the legacy flattened statistics for `actor`, bypassing the
    /// cache.
    ///
    /// # Errors
    ///
    /// Returns the repository error when tasks cannot be loaded.
    pub async fn legacy_for(&self, actor: &Actor) -> TaskRepositoryResult<LegacyStats> {
        let tasks = self.visible_tasks(actor).await?;
        Ok(LegacyStats::from(&self.cache.compute(&tasks)))
    }

    async fn visible_tasks(&self, actor: &Actor) -> TaskRepositoryResult<Vec<Task>> {
        if actor.is_admin() {
            self.repository.find_all().await
        } else {
            self.repository.find_by_owner(actor.name()).await
        }
    }
}
