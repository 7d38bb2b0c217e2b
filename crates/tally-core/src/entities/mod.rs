//! Entity snapshots handed to the engine by the persistence layer.
//!
//! The engine never loads or stores these itself. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` so callers can exchange them
//! as JSON and validate the shape.

mod actor;
mod expense;
mod project;
mod review;
mod task;
mod timesheet;

pub use actor::Actor;
pub use expense::Expense;
pub use project::Project;
pub use review::Review;
pub use task::Task;
pub use timesheet::Timesheet;
