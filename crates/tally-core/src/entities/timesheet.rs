use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Review;
use crate::enums::TimesheetStatus;

/// Hours logged by an employee against a project or task.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Timesheet {
    pub id: String,
    pub submitter_id: String,
    pub status: TimesheetStatus,
    pub hours: f64,
    #[serde(default)]
    pub is_billable: bool,
    /// Rate charged to the customer per hour.
    pub bill_rate: Option<f64>,
    /// Internal cost per hour.
    pub cost_rate: Option<f64>,
    #[serde(flatten)]
    pub review: Review,
}
