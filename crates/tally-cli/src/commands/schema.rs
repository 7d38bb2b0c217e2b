use schemars::schema_for;
use serde_json::Value;
use tally_core::bulk::BulkOutcome;
use tally_core::entities::{Actor, Expense, Project, Task, Timesheet};
use tally_core::metrics::ProjectMetrics;
use tally_core::risk::RiskAssessment;
use tally_core::summary::{ExpenseSummary, TimesheetSummary};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::shared::parse::parse_enum;
use crate::output::output;

/// Types `tally schema` can describe, named as on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum SchemaType {
    Project,
    Task,
    Actor,
    Expense,
    Timesheet,
    ProjectMetrics,
    RiskAssessment,
    BulkOutcome,
    ExpenseSummary,
    TimesheetSummary,
}

impl SchemaType {
    fn schema(self) -> serde_json::Result<Value> {
        match self {
            Self::Project => serde_json::to_value(schema_for!(Project)),
            Self::Task => serde_json::to_value(schema_for!(Task)),
            Self::Actor => serde_json::to_value(schema_for!(Actor)),
            Self::Expense => serde_json::to_value(schema_for!(Expense)),
            Self::Timesheet => serde_json::to_value(schema_for!(Timesheet)),
            Self::ProjectMetrics => serde_json::to_value(schema_for!(ProjectMetrics)),
            Self::RiskAssessment => serde_json::to_value(schema_for!(RiskAssessment)),
            Self::BulkOutcome => serde_json::to_value(schema_for!(BulkOutcome)),
            Self::ExpenseSummary => serde_json::to_value(schema_for!(ExpenseSummary)),
            Self::TimesheetSummary => serde_json::to_value(schema_for!(TimesheetSummary)),
        }
    }
}

/// Handle `tally schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let kind = parse_enum::<SchemaType>(&args.type_name, "schema type")?;
    output(&kind.schema()?, flags.format)
}
