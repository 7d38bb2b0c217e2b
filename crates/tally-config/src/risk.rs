//! Risk scoring thresholds.

use serde::{Deserialize, Serialize};
use tally_core::risk::{BUDGET_CRITICAL_POINTS, RiskThresholds};

use crate::ConfigError;

const fn default_budget_high() -> i64 {
    90
}

const fn default_budget_medium() -> i64 {
    75
}

const fn default_completion_low() -> i64 {
    30
}

const fn default_high_score() -> u32 {
    4
}

const fn default_medium_score() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    /// Budget usage percent above which the critical band applies.
    #[serde(default = "default_budget_high")]
    pub budget_high: i64,

    /// Budget usage percent above which the elevated band applies.
    #[serde(default = "default_budget_medium")]
    pub budget_medium: i64,

    /// Completion rate percent below which progress counts as lagging.
    #[serde(default = "default_completion_low")]
    pub completion_low: i64,

    #[serde(default = "default_high_score")]
    pub high_score: u32,

    #[serde(default = "default_medium_score")]
    pub medium_score: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            budget_high: default_budget_high(),
            budget_medium: default_budget_medium(),
            completion_low: default_completion_low(),
            high_score: default_high_score(),
            medium_score: default_medium_score(),
        }
    }
}

impl RiskConfig {
    /// Reject threshold sets under which a budget overrun could score Low, or
    /// whose percentages fall outside `[0, 100]`.
    ///
    /// # Errors
    ///
    /// `InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.budget_high > 100 {
            return Err(ConfigError::invalid(
                "risk.budget_high",
                format!("must be at most 100, got {}", self.budget_high),
            ));
        }
        if self.budget_medium < 0 {
            return Err(ConfigError::invalid(
                "risk.budget_medium",
                format!("must be at least 0, got {}", self.budget_medium),
            ));
        }
        if self.budget_medium > self.budget_high {
            return Err(ConfigError::invalid(
                "risk.budget_medium",
                format!(
                    "must not exceed risk.budget_high ({}), got {}",
                    self.budget_high, self.budget_medium
                ),
            ));
        }
        if !(0..=100).contains(&self.completion_low) {
            return Err(ConfigError::invalid(
                "risk.completion_low",
                format!("must be between 0 and 100, got {}", self.completion_low),
            ));
        }
        if self.medium_score > BUDGET_CRITICAL_POINTS {
            return Err(ConfigError::invalid(
                "risk.medium_score",
                format!(
                    "must be at most {BUDGET_CRITICAL_POINTS} so a budget overrun alone scores Medium, got {}",
                    self.medium_score
                ),
            ));
        }
        if self.medium_score > self.high_score {
            return Err(ConfigError::invalid(
                "risk.medium_score",
                format!(
                    "must not exceed risk.high_score ({}), got {}",
                    self.high_score, self.medium_score
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            budget_high: self.budget_high,
            budget_medium: self.budget_medium,
            completion_low: self.completion_low,
            high_score: self.high_score,
            medium_score: self.medium_score,
        }
    }
}
