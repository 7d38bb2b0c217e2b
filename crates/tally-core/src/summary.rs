//! Approval queue summaries for expense and timesheet dashboards.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Expense, Timesheet};
use crate::enums::{ExpenseStatus, TimesheetStatus};

/// Totals over the expenses awaiting a decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExpenseSummary {
    /// Expenses in `submitted`.
    pub pending_approvals: usize,
    pub pending_amount: f64,
    pub pending_billable_amount: f64,
    /// Submitted expenses with no receipt attached.
    pub missing_receipts: usize,
}

impl ExpenseSummary {
    #[must_use]
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        expenses
            .into_iter()
            .filter(|expense| expense.status == ExpenseStatus::Submitted)
            .fold(Self::default(), |mut summary, expense| {
                summary.pending_approvals += 1;
                summary.pending_amount += expense.amount;
                if expense.is_billable {
                    summary.pending_billable_amount += expense.amount;
                }
                if expense.receipt_file_id.is_none() {
                    summary.missing_receipts += 1;
                }
                summary
            })
    }
}

/// Hours and cost totals over a set of timesheet entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimesheetSummary {
    pub total_hours: f64,
    pub billable_hours: f64,
    /// Entries still `pending`.
    pub pending_approvals: usize,
    /// Hours times cost rate, entries without a rate contributing nothing.
    pub total_cost: f64,
    /// Billable hours times bill rate.
    pub billable_amount: f64,
}

impl TimesheetSummary {
    #[must_use]
    pub fn from_timesheets<'a>(timesheets: impl IntoIterator<Item = &'a Timesheet>) -> Self {
        let mut summary = Self::default();
        for entry in timesheets {
            summary.total_hours += entry.hours;
            summary.total_cost += entry.hours * entry.cost_rate.unwrap_or(0.0);
            if entry.is_billable {
                summary.billable_hours += entry.hours;
                summary.billable_amount += entry.hours * entry.bill_rate.unwrap_or(0.0);
            }
            if entry.status == TimesheetStatus::Pending {
                summary.pending_approvals += 1;
            }
        }
        summary
    }
}
