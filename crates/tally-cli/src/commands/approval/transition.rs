use serde::de::DeserializeOwned;
use tally_config::TallyConfig;
use tally_core::approval::Approvable;
use tally_core::bulk::BulkActionProcessor;

use super::state_machine;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ActionArgs;
use crate::commands::shared::parse::{parse_actor, parse_enum};
use crate::ledger::{Ledger, LedgerEntry};
use crate::output::output;

/// Apply one transition and print the updated record.
///
/// A refused transition is a command failure; the ledger is left untouched.
pub fn run<E>(
    id: &str,
    args: &ActionArgs,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()>
where
    E: LedgerEntry,
    E::Status: DeserializeOwned,
{
    let target = parse_enum::<E::Status>(&args.to, "status")?;
    let actor = parse_actor(&args.actor_id, &args.actor_role)?;
    let machine = state_machine(config);

    let mut ledger = Ledger::read(&args.ledger)?;
    let mut store = ledger.take_store::<E>();
    let before = store.get(id).map(|current| current.status());

    let record = BulkActionProcessor::new(&machine).apply_one::<E, _>(
        &mut store,
        id,
        target,
        &actor,
        args.reason.as_deref(),
        flags.now,
    )?;

    if before != Some(record.status()) {
        ledger.restore(store);
        ledger.write(&args.ledger)?;
    }
    output(&record, flags.format)
}
