use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Review;
use crate::enums::ExpenseStatus;

/// An expense claim submitted by an employee.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Expense {
    pub id: String,
    pub submitter_id: String,
    pub status: ExpenseStatus,
    pub amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub is_billable: bool,
    pub receipt_file_id: Option<String>,
    #[serde(flatten)]
    pub review: Review,
}
