//! Analytics report shapes.
//!
//! [`TaskAnalytics`] is the dashboard report. [`LegacyStats`] is the older
//! flattened shape, derived from the same computed report.

use crate::task::domain::{TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label used for tasks without an assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Aggregate statistics over a task collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalytics {
    /// Number of tasks.
    pub total: usize,
    /// Number of `DONE` tasks.
    pub done: usize,
    /// `total - done`.
    pub pending: usize,
    /// Number of overdue tasks.
    pub overdue: usize,
    /// `done / total`, or `0.0` for an empty collection.
    pub completion_rate: f64,
    /// Task count per status; every status is present.
    pub distribution: BTreeMap<TaskStatus, usize>,
    /// Task count per priority; every priority is present.
    pub priorities: BTreeMap<TaskPriority, usize>,
    /// Per-status counts for the last eight weeks, bucketed by due date.
    pub weekly: WeeklyTrend,
    /// Productivity grouped by owner, largest group first.
    pub by_owner: Vec<UserProductivity>,
    /// Productivity grouped by assignee, largest group first.
    pub by_assignee: Vec<UserProductivity>,
}

/// Weekly due-date trend, oldest week first.
///
/// All four sequences have the same length and are index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    /// ISO date of each week's Monday.
    pub labels: Vec<String>,
    /// `OPEN` tasks due in each week.
    pub open: Vec<usize>,
    /// `IN_PROGRESS` tasks due in each week.
    pub in_progress: Vec<usize>,
    /// `DONE` tasks due in each week.
    pub done: Vec<usize>,
}

/// Task counts for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProductivity {
    /// Owner or assignee name.
    pub user: String,
    /// Number of tasks in the group.
    pub total: usize,
    /// Number of `DONE` tasks in the group.
    pub done: usize,
    /// Number of overdue tasks in the group.
    pub overdue: usize,
}

/// Backward-compatible flattened statistics shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyStats {
    /// Number of tasks.
    pub total: usize,
    /// Number of tasks with an assignee.
    pub assigned: usize,
    /// Number of `DONE` tasks.
    pub done: usize,
    /// Task count per status.
    pub distribution: BTreeMap<TaskStatus, usize>,
    /// Task count per priority.
    pub priorities: BTreeMap<TaskPriority, usize>,
    /// Weekly trend keyed by status name.
    pub weekly: LegacyWeekly,
}

/// Weekly trend in the legacy shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyWeekly {
    /// ISO date of each week's Monday.
    pub labels: Vec<String>,
    /// `OPEN` tasks due in each week.
    #[serde(rename = "OPEN")]
    pub open: Vec<usize>,
    /// `IN_PROGRESS` tasks due in each week.
    #[serde(rename = "IN_PROGRESS")]
    pub in_progress: Vec<usize>,
    /// `DONE` tasks due in each week.
    #[serde(rename = "DONE")]
    pub done: Vec<usize>,
}

impl From<&TaskAnalytics> for LegacyStats {
    fn from(report: &TaskAnalytics) -> Self {
        let assigned = report
            .by_assignee
            .iter()
            .filter(|group| group.user != UNASSIGNED)
            .map(|group| group.total)
            .sum();
        Self {
            total: report.total,
            assigned,
            done: report.done,
            distribution: report.distribution.clone(),
            priorities: report.priorities.clone(),
            weekly: LegacyWeekly {
                labels: report.weekly.labels.clone(),
                open: report.weekly.open.clone(),
                in_progress: report.weekly.in_progress.clone(),
                done: report.weekly.done.clone(),
            },
        }
    }
}
