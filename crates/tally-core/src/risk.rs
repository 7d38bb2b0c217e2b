//! Project risk scoring.
//!
//! Additive integer score over task and budget signals:
//!
//! | Signal | Points |
//! |---|---|
//! | any delayed task | 2 |
//! | any blocked task | 1 |
//! | budget usage > `budget_high` | 2 |
//! | else budget usage > `budget_medium` | 1 |
//! | completion rate < `completion_low` | 1 |
//!
//! A score of `high_score` or more is High, `medium_score` or more is Medium,
//! anything lower is Low. Every signal that fires is recorded as a
//! [`RiskFactor`] in evaluation order.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RiskLevel;
use crate::metrics::{FinancialMetrics, TaskMetrics};

const DELAYED_POINTS: u32 = 2;
const BLOCKED_POINTS: u32 = 1;
/// Points for budget usage above `budget_high`.
pub const BUDGET_CRITICAL_POINTS: u32 = 2;
const BUDGET_ELEVATED_POINTS: u32 = 1;
const LOW_COMPLETION_POINTS: u32 = 1;

/// Configurable thresholds for the risk score.
///
/// Consistent thresholds keep `0 <= budget_medium <= budget_high <= 100`,
/// `medium_score <= high_score`, and `medium_score <= BUDGET_CRITICAL_POINTS`.
/// Under those bounds a budget overrun lands in the critical band and scores
/// at least Medium on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    /// Budget usage percent above which the critical band applies.
    pub budget_high: i64,
    /// Budget usage percent above which the elevated band applies.
    pub budget_medium: i64,
    /// Completion rate percent below which progress counts as lagging.
    pub completion_low: i64,
    /// Minimum score for [`RiskLevel::High`].
    pub high_score: u32,
    /// Minimum score for [`RiskLevel::Medium`].
    pub medium_score: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            budget_high: 90,
            budget_medium: 75,
            completion_low: 30,
            high_score: 4,
            medium_score: 2,
        }
    }
}

impl RiskThresholds {
    /// Map a score onto a level.
    #[must_use]
    pub const fn level_for(&self, score: u32) -> RiskLevel {
        if score >= self.high_score {
            RiskLevel::High
        } else if score >= self.medium_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Which signal contributed to a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    DelayedTasks,
    BlockedTasks,
    BudgetCritical,
    BudgetElevated,
    LowCompletion,
}

impl RiskFactorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DelayedTasks => "delayed_tasks",
            Self::BlockedTasks => "blocked_tasks",
            Self::BudgetCritical => "budget_critical",
            Self::BudgetElevated => "budget_elevated",
            Self::LowCompletion => "low_completion",
        }
    }
}

impl fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contribution to a risk score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskFactor {
    pub kind: RiskFactorKind,
    pub points: u32,
    /// Human-readable explanation, e.g. `"2 delayed tasks"`.
    pub reason: String,
}

/// Risk level, score, and the factors behind them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    /// Whether a factor of `kind` contributed.
    #[must_use]
    pub fn has_factor(&self, kind: RiskFactorKind) -> bool {
        self.factors.iter().any(|factor| factor.kind == kind)
    }
}

/// Scores project risk from derived metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScorer {
    thresholds: RiskThresholds,
}

impl RiskScorer {
    #[must_use]
    pub const fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    /// Assess risk for one project's metrics.
    #[must_use]
    pub fn assess(&self, task: &TaskMetrics, financial: &FinancialMetrics) -> RiskAssessment {
        let t = &self.thresholds;
        let mut factors = Vec::new();

        if task.delayed_tasks > 0 {
            factors.push(RiskFactor {
                kind: RiskFactorKind::DelayedTasks,
                points: DELAYED_POINTS,
                reason: plural(task.delayed_tasks, "delayed task"),
            });
        }

        if task.blocked_tasks > 0 {
            factors.push(RiskFactor {
                kind: RiskFactorKind::BlockedTasks,
                points: BLOCKED_POINTS,
                reason: plural(task.blocked_tasks, "blocked task"),
            });
        }

        let usage = financial.budget_usage_percent;
        if usage > t.budget_high {
            factors.push(RiskFactor {
                kind: RiskFactorKind::BudgetCritical,
                points: BUDGET_CRITICAL_POINTS,
                reason: format!("budget used: {usage}%"),
            });
        } else if usage > t.budget_medium {
            factors.push(RiskFactor {
                kind: RiskFactorKind::BudgetElevated,
                points: BUDGET_ELEVATED_POINTS,
                reason: format!("budget used: {usage}%"),
            });
        }

        if task.task_completion_rate < t.completion_low {
            factors.push(RiskFactor {
                kind: RiskFactorKind::LowCompletion,
                points: LOW_COMPLETION_POINTS,
                reason: format!("task completion: {}%", task.task_completion_rate),
            });
        }

        let score = factors.iter().map(|factor| factor.points).sum();
        RiskAssessment {
            level: t.level_for(score),
            score,
            factors,
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
