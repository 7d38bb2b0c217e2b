use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// Budget and progress snapshot of a project.
///
/// `progress_pct` is expected in `[0, 100]`. Callers clamp before handing the
/// snapshot to the engine; the engine does not correct it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Project {
    /// Total allocated budget, in the project's currency units.
    #[serde(default)]
    pub budget_amount: f64,
    #[serde(default)]
    pub progress_pct: f64,
    pub status: ProjectStatus,
}
