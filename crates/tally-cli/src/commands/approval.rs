use serde::de::DeserializeOwned;
use tally_config::TallyConfig;
use tally_core::approval::ApprovalStateMachine;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ApprovalCommands;
use crate::ledger::LedgerEntry;

mod bulk;
mod summary;
mod transition;

/// Handle `tally expense` and `tally timesheet`.
pub fn handle<E>(
    action: &ApprovalCommands,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    E: LedgerEntry,
    E::Status: DeserializeOwned,
{
    match action {
        ApprovalCommands::Transition { id, action } => {
            transition::run::<E>(id, action, config, flags)
        }
        ApprovalCommands::Bulk { ids, action } => bulk::run::<E>(ids, action, config, flags),
        ApprovalCommands::Summary { ledger } => summary::run::<E>(ledger, flags),
    }
}

fn state_machine(config: &TallyConfig) -> ApprovalStateMachine {
    ApprovalStateMachine::new(config.approval.policy())
}
