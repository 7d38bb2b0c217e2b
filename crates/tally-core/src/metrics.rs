//! Project task and financial metrics.
//!
//! Everything here is derived on every call from a project snapshot, its task
//! list, and the caller's clock. Nothing is cached, so a result can never be
//! stale relative to its inputs.
//!
//! Ratios are guarded against empty and zero inputs and never fail.
//! Percentages are rounded half-up to whole numbers for display, always from
//! unrounded intermediates.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Project, Task};
use crate::enums::TaskState;

/// Revenue-to-budget multiplier used when no policy overrides it (a 30% markup).
pub const DEFAULT_REVENUE_MULTIPLIER: f64 = 1.3;

/// Policy knobs for the financial projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialPolicy {
    /// Estimated revenue as a multiple of the project budget.
    pub revenue_multiplier: f64,
}

impl Default for FinancialPolicy {
    fn default() -> Self {
        Self {
            revenue_multiplier: DEFAULT_REVENUE_MULTIPLIER,
        }
    }
}

/// Task counts and completion for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub blocked_tasks: usize,
    /// Tasks past their due date that are not done.
    pub delayed_tasks: usize,
    /// Whole-number percentage of tasks done; 0 for an empty project.
    pub task_completion_rate: i64,
    /// Sum of task estimates, missing estimates counted as zero.
    pub total_estimated_hours: f64,
    /// Sum of estimates over done tasks.
    pub completed_hours: f64,
}

/// Budget consumption and profit projection for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FinancialMetrics {
    pub budget_used: f64,
    pub budget_remaining: f64,
    /// Whole-number percentage of budget consumed. Exceeds 100 on overrun.
    pub budget_usage_percent: i64,
    pub estimated_revenue: f64,
    pub actual_cost: f64,
    pub estimated_profit: f64,
    pub current_profit: f64,
    pub profit_margin: i64,
}

/// Both metric groups for a project, as shown on its dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectMetrics {
    pub task: TaskMetrics,
    pub financial: FinancialMetrics,
}

/// Computes [`ProjectMetrics`] from snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator {
    policy: FinancialPolicy,
}

impl MetricsCalculator {
    #[must_use]
    pub const fn new(policy: FinancialPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> FinancialPolicy {
        self.policy
    }

    /// Compute task and financial metrics for `project` as of `now`.
    ///
    /// `project.progress_pct` must already be clamped to `[0, 100]`.
    #[must_use]
    pub fn calculate(&self, project: &Project, tasks: &[Task], now: DateTime<Utc>) -> ProjectMetrics {
        ProjectMetrics {
            task: task_metrics(tasks, now),
            financial: self.financial_metrics(project),
        }
    }

    /// Budget, revenue, and profit figures derived from budget and progress.
    #[must_use]
    pub fn financial_metrics(&self, project: &Project) -> FinancialMetrics {
        let budget = project.budget_amount;
        let progress = project.progress_pct / 100.0;

        let budget_used = budget * progress;
        let estimated_revenue = budget * self.policy.revenue_multiplier;
        let estimated_profit = estimated_revenue - budget;
        let actual_cost = budget_used;

        FinancialMetrics {
            budget_used,
            budget_remaining: budget - budget_used,
            budget_usage_percent: percent_of(budget_used, budget),
            estimated_revenue,
            actual_cost,
            estimated_profit,
            current_profit: estimated_revenue * progress - actual_cost,
            profit_margin: percent_of(estimated_profit, estimated_revenue),
        }
    }
}

/// Count tasks by state and sum their estimates.
///
/// A task is delayed when its due date (taken as midnight UTC) is before
/// `now` and it is not done.
#[must_use]
pub fn task_metrics(tasks: &[Task], now: DateTime<Utc>) -> TaskMetrics {
    let mut metrics = TaskMetrics {
        total_tasks: tasks.len(),
        ..TaskMetrics::default()
    };

    for task in tasks {
        let hours = task.estimate_hours.unwrap_or(0.0);
        metrics.total_estimated_hours += hours;

        match task.state {
            TaskState::Done => {
                metrics.completed_tasks += 1;
                metrics.completed_hours += hours;
            }
            TaskState::InProgress => metrics.in_progress_tasks += 1,
            TaskState::Blocked => metrics.blocked_tasks += 1,
            TaskState::New => {}
        }

        if task.state != TaskState::Done && is_past_due(task, now) {
            metrics.delayed_tasks += 1;
        }
    }

    metrics.task_completion_rate = count_percent(metrics.completed_tasks, metrics.total_tasks);
    metrics
}

#[allow(clippy::cast_precision_loss)]
fn count_percent(part: usize, whole: usize) -> i64 {
    percent_of(part as f64, whole as f64)
}

fn is_past_due(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date
        .and_then(|due| due.and_hms_opt(0, 0, 0))
        .is_some_and(|due| due.and_utc() < now)
}

/// `part / whole * 100` rounded half-up, or 0 when `whole` is not positive.
#[must_use]
pub fn percent_of(part: f64, whole: f64) -> i64 {
    if whole > 0.0 {
        round_half_up(part / whole * 100.0)
    } else {
        0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
