//! Approval workflow rules.

use serde::{Deserialize, Serialize};
use tally_core::approval::ApprovalPolicy;

use crate::ConfigError;

const fn default_enforce_roles() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApprovalConfig {
    /// Only admins, project managers, and finance may approve or reject.
    #[serde(default = "default_enforce_roles")]
    pub enforce_roles: bool,

    /// Expense approvals above this amount need a receipt. Unset disables
    /// the rule.
    #[serde(default)]
    pub receipt_required_above: Option<f64>,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            enforce_roles: default_enforce_roles(),
            receipt_required_above: None,
        }
    }
}

impl ApprovalConfig {
    /// # Errors
    ///
    /// `InvalidValue` when the receipt threshold is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threshold) = self.receipt_required_above {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(ConfigError::invalid(
                    "approval.receipt_required_above",
                    format!("must be a finite amount >= 0, got {threshold}"),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn policy(&self) -> ApprovalPolicy {
        ApprovalPolicy {
            enforce_roles: self.enforce_roles,
            receipt_required_above: self.receipt_required_above,
        }
    }
}
