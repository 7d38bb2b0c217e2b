//! JSON ledger file holding expenses and timesheets.
//!
//! The ledger stands in for a database: commands load it into a
//! [`MemoryStore`], run the engine, and write the records back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tally_core::approval::Approvable;
use tally_core::entities::{Expense, Timesheet};
use tally_core::store::MemoryStore;
use tally_core::summary::{ExpenseSummary, TimesheetSummary};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub timesheets: Vec<Timesheet>,
}

impl Ledger {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read ledger {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid ledger JSON in {}", path.display()))
    }

    /// Write through a sibling temp file so a failed write never truncates
    /// the existing ledger.
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');

        let tmp = temp_path(path);
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("failed to replace ledger {}", path.display()))
    }

    /// Move the records of one kind into a store, leaving the ledger's list empty.
    pub fn take_store<E: LedgerEntry>(&mut self) -> MemoryStore<E> {
        MemoryStore::new(std::mem::take(E::records_mut(self)))
    }

    /// Put a store's records back in place.
    pub fn restore<E: LedgerEntry>(&mut self, store: MemoryStore<E>) {
        *E::records_mut(self) = store.into_records();
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A record kind stored in the ledger.
pub trait LedgerEntry: Approvable + Serialize + DeserializeOwned {
    type Summary: Serialize;

    fn records(ledger: &Ledger) -> &[Self];
    fn records_mut(ledger: &mut Ledger) -> &mut Vec<Self>;
    fn summarize(records: &[Self]) -> Self::Summary;
}

impl LedgerEntry for Expense {
    type Summary = ExpenseSummary;

    fn records(ledger: &Ledger) -> &[Self] {
        &ledger.expenses
    }

    fn records_mut(ledger: &mut Ledger) -> &mut Vec<Self> {
        &mut ledger.expenses
    }

    fn summarize(records: &[Self]) -> ExpenseSummary {
        ExpenseSummary::from_expenses(records)
    }
}

impl LedgerEntry for Timesheet {
    type Summary = TimesheetSummary;

    fn records(ledger: &Ledger) -> &[Self] {
        &ledger.timesheets
    }

    fn records_mut(ledger: &mut Ledger) -> &mut Vec<Self> {
        &mut ledger.timesheets
    }

    fn summarize(records: &[Self]) -> TimesheetSummary {
        TimesheetSummary::from_timesheets(records)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tally_core::entities::Review;
    use tally_core::enums::{ExpenseStatus, TimesheetStatus};

    use super::*;

    fn sample() -> Ledger {
        Ledger {
            expenses: vec![Expense {
                id: "exp-1".into(),
                submitter_id: "usr-alice".into(),
                status: ExpenseStatus::Submitted,
                amount: 75.0,
                tax_amount: 0.0,
                is_billable: true,
                receipt_file_id: None,
                review: Review::default(),
            }],
            timesheets: vec![Timesheet {
                id: "ts-1".into(),
                submitter_id: "usr-alice".into(),
                status: TimesheetStatus::Pending,
                hours: 8.0,
                is_billable: true,
                bill_rate: Some(120.0),
                cost_rate: Some(50.0),
                review: Review::default(),
            }],
        }
    }

    #[test]
    fn write_then_read_preserves_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        sample().write(&path).unwrap();
        assert_eq!(Ledger::read(&path).unwrap(), sample());
        assert!(!dir.path().join("ledger.json.tmp").exists());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(Ledger::read(&path).unwrap(), Ledger::default());
    }

    #[test]
    fn unreadable_ledger_names_the_file() {
        let err = Ledger::read(Path::new("/nonexistent/ledger.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ledger.json"));
    }

    #[test]
    fn take_and_restore_round_trip() {
        let mut ledger = sample();
        let store = ledger.take_store::<Timesheet>();
        assert!(ledger.timesheets.is_empty());
        assert_eq!(store.records().len(), 1);

        ledger.restore(store);
        assert_eq!(ledger, sample());
        assert_eq!(Timesheet::records(&ledger).len(), 1);
    }
}
