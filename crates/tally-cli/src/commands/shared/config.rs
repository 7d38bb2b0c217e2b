use anyhow::Context;
use tally_config::TallyConfig;

/// Load layered configuration, including `.env`.
pub fn load() -> anyhow::Result<TallyConfig> {
    let config = TallyConfig::load_with_dotenv().context("failed to load tally configuration")?;
    tracing::debug!(
        revenue_multiplier = config.finance.revenue_multiplier,
        enforce_roles = config.approval.enforce_roles,
        receipt_required_above = ?config.approval.receipt_required_above,
        "configuration loaded"
    );
    Ok(config)
}
