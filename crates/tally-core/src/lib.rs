//! # tally-core
//!
//! Financial metrics, risk scoring, and approval workflows for Tally.
//!
//! Every computation here is synchronous and in-memory. Callers hand in
//! snapshots loaded elsewhere and receive derived values or updated records
//! back:
//! - [`metrics::MetricsCalculator`]: task and budget metrics for one project
//! - [`risk::RiskScorer`]: additive risk score with contributing factors
//! - [`approval::ApprovalStateMachine`]: single expense/timesheet transitions
//! - [`bulk::BulkActionProcessor`]: per-item transitions over an [`store::EntityStore`]
//! - [`summary`]: approval queue totals

pub mod approval;
pub mod bulk;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod metrics;
pub mod risk;
pub mod store;
pub mod summary;
