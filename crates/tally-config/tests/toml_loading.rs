//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tally_config::{ConfigError, TallyConfig};
use tally_core::risk::RiskThresholds;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[finance]
revenue_multiplier = 1.5

[risk]
budget_high = 85
budget_medium = 70
completion_low = 25
high_score = 5
medium_score = 2

[approval]
enforce_roles = false
receipt_required_above = 500.0
"#,
        )?;

        let config: TallyConfig = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!((config.finance.revenue_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(
            config.risk.thresholds(),
            RiskThresholds {
                budget_high: 85,
                budget_medium: 70,
                completion_low: 25,
                high_score: 5,
                medium_score: 2,
            }
        );
        assert!(!config.approval.enforce_roles);
        assert_eq!(config.approval.receipt_required_above, Some(500.0));
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[risk]
completion_low = 40
",
        )?;

        let config: TallyConfig = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.risk.completion_low, 40);
        assert_eq!(config.risk.budget_high, 90);
        assert_eq!(config.risk.high_score, 4);
        assert!((config.finance.revenue_multiplier - 1.3).abs() < f64::EPSILON);
        assert!(config.approval.enforce_roles);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tally")?;
        jail.create_file(
            ".tally/config.toml",
            r"
[approval]
receipt_required_above = 250.0
",
        )?;

        let config = TallyConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.approval.receipt_required_above, Some(250.0));
        assert_eq!(config.approval.policy().receipt_required_above, Some(250.0));
        Ok(())
    });
}

#[test]
fn invalid_thresholds_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[risk]
budget_high = 70
budget_medium = 80
",
        )?;

        let figment = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = TallyConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "risk.budget_medium"
        ));
        Ok(())
    });
}

#[test]
fn medium_score_above_overrun_points_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[risk]
medium_score = 3
",
        )?;

        let figment = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = TallyConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "risk.medium_score"
        ));
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[risk]
high_score = "lots"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = TallyConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
