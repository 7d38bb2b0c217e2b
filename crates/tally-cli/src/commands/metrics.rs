use tally_config::TallyConfig;
use tally_core::entities::{Project, Task};
use tally_core::metrics::{MetricsCalculator, ProjectMetrics};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectArgs;
use crate::commands::shared::input::read_json;
use crate::output::output;

/// Handle `tally metrics`.
pub fn handle(args: &ProjectArgs, config: &TallyConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let metrics = compute(args, config, flags)?;
    output(&metrics, flags.format)
}

/// Load the project snapshot and tasks, then derive metrics as of `flags.now`.
pub fn compute(
    args: &ProjectArgs,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<ProjectMetrics> {
    let project: Project = read_json(&args.project, "project")?;
    let tasks: Vec<Task> = match &args.tasks {
        Some(path) => read_json(path, "tasks")?,
        None => Vec::new(),
    };

    let calculator = MetricsCalculator::new(config.finance.policy());
    Ok(calculator.calculate(&project, &tasks, flags.now))
}
