//! Financial projection settings.

use serde::{Deserialize, Serialize};
use tally_core::metrics::{DEFAULT_REVENUE_MULTIPLIER, FinancialPolicy};

use crate::ConfigError;

const fn default_revenue_multiplier() -> f64 {
    DEFAULT_REVENUE_MULTIPLIER
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinanceConfig {
    /// Estimated revenue as a multiple of project budget.
    #[serde(default = "default_revenue_multiplier")]
    pub revenue_multiplier: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            revenue_multiplier: default_revenue_multiplier(),
        }
    }
}

impl FinanceConfig {
    /// Check the multiplier is a usable finite, non-negative number.
    ///
    /// # Errors
    ///
    /// `InvalidValue` on `finance.revenue_multiplier`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.revenue_multiplier.is_finite() || self.revenue_multiplier < 0.0 {
            return Err(ConfigError::invalid(
                "finance.revenue_multiplier",
                format!(
                    "must be a finite number >= 0, got {}",
                    self.revenue_multiplier
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn policy(&self) -> FinancialPolicy {
        FinancialPolicy {
            revenue_multiplier: self.revenue_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = FinanceConfig::default();
        assert!((config.revenue_multiplier - 1.3).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_and_nan_rejected() {
        for bad in [-0.1, f64::NAN, f64::INFINITY] {
            let config = FinanceConfig {
                revenue_multiplier: bad,
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { ref field, .. }) if field == "finance.revenue_multiplier"
            ));
        }
    }

    #[test]
    fn zero_multiplier_is_allowed() {
        let config = FinanceConfig {
            revenue_multiplier: 0.0,
        };
        assert!(config.validate().is_ok());
        assert!(config.policy().revenue_multiplier.abs() < f64::EPSILON);
    }
}
