use std::path::Path;

use crate::cli::GlobalFlags;
use crate::ledger::{Ledger, LedgerEntry};
use crate::output::output;

pub fn run<E: LedgerEntry>(ledger: &Path, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ledger = Ledger::read(ledger)?;
    output(&E::summarize(E::records(&ledger)), flags.format)
}
