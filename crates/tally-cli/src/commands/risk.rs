use serde::Serialize;
use tally_config::TallyConfig;
use tally_core::metrics::ProjectMetrics;
use tally_core::risk::{RiskAssessment, RiskScorer};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectArgs;
use crate::commands::metrics;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RiskReport {
    risk: RiskAssessment,
    metrics: ProjectMetrics,
}

/// Handle `tally risk`.
pub fn handle(args: &ProjectArgs, config: &TallyConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let metrics = metrics::compute(args, config, flags)?;
    let risk = RiskScorer::new(config.risk.thresholds()).assess(&metrics.task, &metrics.financial);
    tracing::debug!(level = %risk.level, score = risk.score, "risk assessed");
    output(&RiskReport { risk, metrics }, flags.format)
}
