//! # tally-config
//!
//! Layered configuration loading for Tally using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TALLY_*` prefix, `__` as separator)
//! 2. Project-level `.tally/config.toml`
//! 3. User-level `~/.config/tally/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TALLY_RISK__BUDGET_HIGH` -> `risk.budget_high`,
//! `TALLY_APPROVAL__RECEIPT_REQUIRED_ABOVE` -> `approval.receipt_required_above`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tally_config::TallyConfig;
//! use tally_core::risk::RiskScorer;
//!
//! let config = TallyConfig::load_with_dotenv().expect("config");
//! let scorer = RiskScorer::new(config.risk.thresholds());
//! ```

mod approval;
mod error;
mod finance;
mod risk;

pub use approval::ApprovalConfig;
pub use error::ConfigError;
pub use finance::FinanceConfig;
pub use risk::RiskConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub finance: FinanceConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub approval: ApprovalConfig,
}

impl TallyConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`TallyConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// `Figment` when a source fails to parse or extract, `InvalidValue` when
    /// a setting fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the working directory or
    /// the workspace root.
    ///
    /// # Errors
    ///
    /// Same as [`TallyConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Same as [`TallyConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tally/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TALLY_").split("__"))
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// `InvalidValue` for the first setting that fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.finance.validate()?;
        self.risk.validate()?;
        self.approval.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }

    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tally_core::approval::ApprovalPolicy;
    use tally_core::risk::RiskThresholds;

    #[test]
    fn default_config_is_valid() {
        let config = TallyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.risk.thresholds(), RiskThresholds::default());
        assert_eq!(config.approval.policy(), ApprovalPolicy::default());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config = TallyConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.risk.budget_high, 90);
            assert!(config.approval.enforce_roles);
            Ok(())
        });
    }
}
