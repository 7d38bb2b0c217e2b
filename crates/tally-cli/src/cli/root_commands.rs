use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::ApprovalCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Task and financial metrics for a project.
    Metrics(ProjectArgs),
    /// Metrics plus the additive risk score.
    Risk(ProjectArgs),
    /// Expense approval workflow.
    Expense {
        #[command(subcommand)]
        action: ApprovalCommands,
    },
    /// Timesheet approval workflow.
    Timesheet {
        #[command(subcommand)]
        action: ApprovalCommands,
    },
    /// Print the JSON Schema for a type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProjectArgs {
    /// JSON file with the project snapshot.
    #[arg(long)]
    pub project: PathBuf,
    /// JSON file with the project's task list (defaults to no tasks).
    #[arg(long)]
    pub tasks: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. expense, timesheet, bulk_outcome.
    pub type_name: String,
}
