use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Approval commands shared by expenses and timesheets.
#[derive(Clone, Debug, Subcommand)]
pub enum ApprovalCommands {
    /// Move one record to a new status.
    Transition {
        id: String,
        #[command(flatten)]
        action: ActionArgs,
    },
    /// Apply one status change to many records, each independently.
    Bulk {
        #[arg(required = true)]
        ids: Vec<String>,
        #[command(flatten)]
        action: ActionArgs,
    },
    /// Approval queue totals.
    Summary {
        /// JSON ledger file.
        #[arg(long)]
        ledger: PathBuf,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ActionArgs {
    /// Target status, e.g. approved, rejected, paid.
    #[arg(long)]
    pub to: String,
    /// JSON ledger file; rewritten when a record changes.
    #[arg(long)]
    pub ledger: PathBuf,
    /// ID of the user performing the action.
    #[arg(long)]
    pub actor_id: String,
    /// Role of the acting user: admin, project_manager, team_member, finance.
    #[arg(long)]
    pub actor_role: String,
    /// Reason recorded with a rejection.
    #[arg(long)]
    pub reason: Option<String>,
}
