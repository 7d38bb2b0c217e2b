use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{TaskPriority, TaskState};

/// A task belonging to a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Task {
    pub state: TaskState,
    pub due_date: Option<NaiveDate>,
    pub estimate_hours: Option<f64>,
    pub priority: TaskPriority,
}
