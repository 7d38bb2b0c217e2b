use chrono::{DateTime, Utc};
use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tally` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Tally - project metrics, risk, and approvals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Evaluate as of this RFC 3339 instant instead of the system clock
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            now: self.now.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::subcommands::ApprovalCommands;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tally",
            "--format",
            "table",
            "--verbose",
            "metrics",
            "--project",
            "project.json",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Metrics(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tally", "schema", "expense", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Schema(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tally", "--format", "xml", "schema", "expense"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn now_flag_pins_the_clock() {
        let cli = Cli::try_parse_from([
            "tally",
            "--now",
            "2026-05-04T09:30:00Z",
            "schema",
            "expense",
        ])
        .expect("cli should parse");
        assert_eq!(
            cli.global_flags().now,
            Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn bulk_requires_at_least_one_id() {
        let parsed = Cli::try_parse_from([
            "tally",
            "expense",
            "bulk",
            "--to",
            "approved",
            "--ledger",
            "ledger.json",
            "--actor-id",
            "usr-bob",
            "--actor-role",
            "project_manager",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn transition_parses_action_args() {
        let cli = Cli::try_parse_from([
            "tally",
            "timesheet",
            "transition",
            "ts-1",
            "--to",
            "rejected",
            "--ledger",
            "ledger.json",
            "--actor-id",
            "usr-bob",
            "--actor-role",
            "project-manager",
            "--reason",
            "duplicate entry",
        ])
        .expect("cli should parse");

        let Commands::Timesheet {
            action: ApprovalCommands::Transition { id, action },
        } = cli.command
        else {
            panic!("expected timesheet transition");
        };
        assert_eq!(id, "ts-1");
        assert_eq!(action.to, "rejected");
        assert_eq!(action.reason.as_deref(), Some("duplicate entry"));
    }
}
