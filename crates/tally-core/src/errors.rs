//! Approval error types.
//!
//! Metrics and risk scoring never fail; every error here comes from a single
//! expense or timesheet transition and is recoverable. Bulk processing
//! flattens each one into a [`TransitionErrorKind`] so a batch can report
//! per-item outcomes.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::EntityType;

/// Which structural rule refused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ForbiddenRule {
    /// The actor submitted the record they are trying to decide on.
    SelfApproval,
    /// The actor's role may not make approval decisions.
    RoleNotPermitted,
}

impl ForbiddenRule {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfApproval => "submitter cannot decide on their own record",
            Self::RoleNotPermitted => "role is not allowed to approve",
        }
    }
}

impl fmt::Display for ForbiddenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while validating or persisting one status transition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    /// The `(current, target)` pair is not in the legal transition table.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: EntityType,
        id: String,
        from: String,
        to: String,
    },

    /// A rejection was requested without a non-blank reason.
    #[error("Rejection reason is required: {entity_type} {id}")]
    MissingReason { entity_type: EntityType, id: String },

    /// The actor may not perform this transition.
    #[error("Forbidden: {actor_id} cannot move {entity_type} {id} to {to} ({rule})")]
    Forbidden {
        entity_type: EntityType,
        id: String,
        actor_id: String,
        to: String,
        rule: ForbiddenRule,
    },

    /// Approval needs a receipt for amounts above the configured threshold.
    #[error("Receipt required: {entity_type} {id} amount {amount} exceeds {threshold}")]
    ReceiptRequired {
        entity_type: EntityType,
        id: String,
        amount: f64,
        threshold: f64,
    },

    /// The record changed status between read and write.
    #[error("Concurrent update: {entity_type} {id} expected {expected}, found {actual}")]
    Conflict {
        entity_type: EntityType,
        id: String,
        expected: String,
        actual: String,
    },

    /// The store has no record with this ID.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// The store could not be reached or failed for a reason of its own.
    #[error("Store unavailable for {entity_type} {id}: {message}")]
    StoreUnavailable {
        entity_type: EntityType,
        id: String,
        message: String,
    },
}

impl TransitionError {
    /// The flat error kind reported in bulk results.
    #[must_use]
    pub const fn kind(&self) -> TransitionErrorKind {
        match self {
            Self::InvalidTransition { .. } => TransitionErrorKind::InvalidTransition,
            Self::MissingReason { .. } => TransitionErrorKind::MissingReason,
            Self::Forbidden { .. } => TransitionErrorKind::Forbidden,
            Self::ReceiptRequired { .. } => TransitionErrorKind::ReceiptRequired,
            Self::Conflict { .. } => TransitionErrorKind::Conflict,
            Self::NotFound { .. } => TransitionErrorKind::NotFound,
            Self::StoreUnavailable { .. } => TransitionErrorKind::StoreUnavailable,
        }
    }

    /// ID of the record the error refers to.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::InvalidTransition { id, .. }
            | Self::MissingReason { id, .. }
            | Self::Forbidden { id, .. }
            | Self::ReceiptRequired { id, .. }
            | Self::Conflict { id, .. }
            | Self::NotFound { id, .. }
            | Self::StoreUnavailable { id, .. } => id,
        }
    }
}

/// Serializable discriminant of [`TransitionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransitionErrorKind {
    InvalidTransition,
    MissingReason,
    Forbidden,
    ReceiptRequired,
    Conflict,
    NotFound,
    StoreUnavailable,
}

impl TransitionErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidTransition => "invalid_transition",
            Self::MissingReason => "missing_reason",
            Self::Forbidden => "forbidden",
            Self::ReceiptRequired => "receipt_required",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl fmt::Display for TransitionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
