//! Aggregate statistics over a task collection.
//!
//! [`AnalyticsEngine::compute`] is a pure function of its inputs: every
//! time-dependent field is evaluated against the single `now` passed in.

use super::report::{TaskAnalytics, UNASSIGNED, UserProductivity, WeeklyTrend};
use crate::task::{
    domain::{Task, TaskPriority, TaskStatus},
    policy::TaskPolicy,
};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// Number of weeks covered by the weekly trend.
pub const TREND_WEEKS: usize = 8;

/// Computes [`TaskAnalytics`] reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsEngine {
    policy: TaskPolicy,
}

impl AnalyticsEngine {
    /// Creates an engine using `policy` for the overdue rule.
    #[must_use]
    pub const fn new(policy: TaskPolicy) -> Self {
        Self { policy }
    }

    /// Computes the report for `tasks` as seen at `now`.
    ///
    /// Week boundaries follow `now`'s time zone.
    #[must_use]
    pub fn compute<Tz: TimeZone>(&self, tasks: &[Task], now: &DateTime<Tz>) -> TaskAnalytics {
        let instant = now.with_timezone(&Utc);
        let total = tasks.len();
        let done = count_status(tasks, TaskStatus::Done);
        let overdue = tasks
            .iter()
            .filter(|task| self.policy.is_overdue(task, instant))
            .count();

        let distribution = TaskStatus::ALL
            .into_iter()
            .map(|status| (status, count_status(tasks, status)))
            .collect();
        let priorities = TaskPriority::ALL
            .into_iter()
            .map(|priority| {
                let count = tasks
                    .iter()
                    .filter(|task| task.priority() == priority)
                    .count();
                (priority, count)
            })
            .collect();

        let by_owner = self.productivity(tasks, instant, |task| task.owner().to_owned());
        let by_assignee = self.productivity(tasks, instant, assignee_label);

        TaskAnalytics {
            total,
            done,
            pending: total - done,
            overdue,
            completion_rate: completion_rate(done, total),
            distribution,
            priorities,
            weekly: weekly_trend(tasks, now),
            by_owner,
            by_assignee,
        }
    }

    fn productivity(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
        key: impl Fn(&Task) -> String,
    ) -> Vec<UserProductivity> {
        let mut groups: BTreeMap<String, UserProductivity> = BTreeMap::new();
        for task in tasks {
            let user = key(task);
            let group = groups
                .entry(user.clone())
                .or_insert_with(|| UserProductivity {
                    user,
                    total: 0,
                    done: 0,
                    overdue: 0,
                });
            group.total += 1;
            if task.status() == TaskStatus::Done {
                group.done += 1;
            }
            if self.policy.is_overdue(task, now) {
                group.overdue += 1;
            }
        }

        let mut ranked: Vec<UserProductivity> = groups.into_values().collect();
        ranked.sort_by(|left, right| right.total.cmp(&left.total));
        ranked
    }
}

fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status() == status).count()
}

fn assignee_label(task: &Task) -> String {
    task.assignee()
        .map(str::trim)
        .filter(|assignee| !assignee.is_empty())
        .unwrap_or(UNASSIGNED)
        .to_owned()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "completion rate is reported as a floating-point ratio of task counts"
)]
fn completion_rate(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64
}

/// Returns the Monday starting the week that contains `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Returns the Mondays of the last [`TREND_WEEKS`] weeks, oldest first.
fn trend_week_starts(today: NaiveDate) -> Vec<NaiveDate> {
    let current = week_start(today);
    (0..TREND_WEEKS)
        .rev()
        .filter_map(|weeks_back| {
            let days = u64::try_from(weeks_back * 7).ok()?;
            current.checked_sub_days(Days::new(days))
        })
        .collect()
}

fn weekly_trend<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> WeeklyTrend {
    let zone = now.timezone();
    let starts = trend_week_starts(now.date_naive());
    let mut trend = WeeklyTrend {
        labels: starts.iter().map(ToString::to_string).collect(),
        open: vec![0; starts.len()],
        in_progress: vec![0; starts.len()],
        done: vec![0; starts.len()],
    };

    for task in tasks {
        let Some(due) = task.due_date() else {
            continue;
        };
        let due_week = week_start(due.with_timezone(&zone).date_naive());
        let Some(index) = starts.iter().position(|start| *start == due_week) else {
            continue;
        };
        let series = match task.status() {
            TaskStatus::Open => &mut trend.open,
            TaskStatus::InProgress => &mut trend.in_progress,
            TaskStatus::Done => &mut trend.done,
        };
        if let Some(slot) = series.get_mut(index) {
            *slot += 1;
        }
    }
    trend
}
