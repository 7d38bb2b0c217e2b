use tally_config::TallyConfig;
use tally_core::entities::{Expense, Timesheet};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &TallyConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Metrics(args) => commands::metrics::handle(&args, config, flags),
        Commands::Risk(args) => commands::risk::handle(&args, config, flags),
        Commands::Expense { action } => {
            commands::approval::handle::<Expense>(&action, config, flags)
        }
        Commands::Timesheet { action } => {
            commands::approval::handle::<Timesheet>(&action, config, flags)
        }
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
