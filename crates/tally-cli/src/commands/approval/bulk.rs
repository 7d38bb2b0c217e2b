use serde::de::DeserializeOwned;
use tally_config::TallyConfig;
use tally_core::bulk::BulkActionProcessor;

use super::state_machine;
use crate::cli::subcommands::ActionArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::{parse_actor, parse_enum};
use crate::ledger::{Ledger, LedgerEntry};
use crate::output::output;

/// Apply one target status to every ID and print per-item results.
///
/// Item failures are reported in the output, never as a command failure.
pub fn run<E>(
    ids: &[String],
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

    let outcome = BulkActionProcessor::new(&machine).process::<E, _>(
        &mut store,
        ids,
        target,
        &actor,
        args.reason.as_deref(),
        flags.now,
    );

    if outcome.results.iter().any(|result| result.changed) {
        ledger.restore(store);
        ledger.write(&args.ledger)?;
    }

    if flags.format == OutputFormat::Table {
        output(&outcome.results, flags.format)?;
        if !flags.quiet {
            println!("{}", outcome.summary());
        }
        return Ok(());
    }
    output(&outcome, flags.format)
}
