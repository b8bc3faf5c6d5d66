//! Task analytics: aggregate reports, their cache, and per-actor views.
//!
//! - [`engine`] computes reports from a task collection
//! - [`report`] holds the dashboard and legacy report shapes
//! - [`cache`] stores the latest report per query key
//! - [`service`] scopes reports to the acting user

pub mod cache;
pub mod engine;
pub mod report;
pub mod service;

pub use cache::{AnalyticsCache, CacheInvalidationListener, CachedReport};
pub use engine::{AnalyticsEngine, TREND_WEEKS};
pub use report::{
    LegacyStats, LegacyWeekly, TaskAnalytics, UNASSIGNED, UserProductivity, WeeklyTrend,
};
pub use service::{ADMIN_KEY, AnalyticsService, cache_key};
