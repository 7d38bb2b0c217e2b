//! Bulk approval actions.
//!
//! Runs one target transition over a list of record IDs. Each item is loaded,
//! validated, and written back on its own; a failing item is recorded and the
//! batch moves on. There is no cross-item transaction, so a caller that stops
//! part-way keeps every transition already applied.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::approval::{Approvable, ApprovalStateMachine};
use crate::entities::Actor;
use crate::enums::EntityType;
use crate::errors::{TransitionError, TransitionErrorKind};
use crate::store::EntityStore;

/// Outcome of one item in a bulk action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkResult {
    pub id: String,
    pub success: bool,
    /// Whether the stored record was modified. False for no-ops and failures.
    pub changed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<TransitionErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl BulkResult {
    fn applied(id: &str, changed: bool) -> Self {
        Self {
            id: id.to_string(),
            success: true,
            changed,
            error_kind: None,
            detail: None,
        }
    }

    fn failed(id: &str, error: &TransitionError) -> Self {
        Self {
            id: id.to_string(),
            success: false,
            changed: false,
            error_kind: Some(error.kind()),
            detail: Some(error.to_string()),
        }
    }
}

/// All per-item results of a bulk action, in input order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkOutcome {
    pub entity_type: EntityType,
    pub target: String,
    pub results: Vec<BulkResult>,
}

impl BulkOutcome {
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.success).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// One-line report, e.g. `"8 of 10 approved; 2 failed: 2 invalid_transition"`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} of {} {}",
            self.succeeded(),
            self.results.len(),
            self.target
        );

        let mut counts: Vec<(TransitionErrorKind, usize)> = Vec::new();
        for kind in self.results.iter().filter_map(|result| result.error_kind) {
            match counts.iter_mut().find(|(seen, _)| *seen == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((kind, 1)),
            }
        }

        if !counts.is_empty() {
            let breakdown = counts
                .iter()
                .map(|(kind, count)| format!("{count} {kind}"))
                .collect::<Vec<_>>()
                .join(", ");
            line.push_str(&format!("; {} failed: {breakdown}", self.failed()));
        }
        line
    }
}

/// Applies one transition across many records through an [`EntityStore`].
#[derive(Debug, Clone, Copy)]
pub struct BulkActionProcessor<'a> {
    machine: &'a ApprovalStateMachine,
}

impl<'a> BulkActionProcessor<'a> {
    #[must_use]
    pub const fn new(machine: &'a ApprovalStateMachine) -> Self {
        Self { machine }
    }

    /// Load `id`, apply the transition, and persist it with a compare-and-swap
    /// on the status that was read.
    ///
    /// Returns the record as stored afterwards.
    ///
    /// # Errors
    ///
    /// Any [`TransitionError`]: rule violations from the state machine, or
    /// `NotFound`, `Conflict`, `StoreUnavailable` from the store.
    pub fn apply_one<E, S>(
        &self,
        store: &mut S,
        id: &str,
        target: E::Status,
        actor: &Actor,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<E, TransitionError>
    where
        E: Approvable,
        S: EntityStore<E> + ?Sized,
    {
        self.apply_tracked::<E, S>(store, id, target, actor, reason, at)
            .map(|(record, _)| record)
    }

    /// Apply `target` to every ID in `ids`, independently and in order.
    pub fn process<E, S>(
        &self,
        store: &mut S,
        ids: &[String],
        target: E::Status,
        actor: &Actor,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> BulkOutcome
    where
        E: Approvable,
        S: EntityStore<E> + ?Sized,
    {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            let result = match self.apply_tracked::<E, S>(store, id, target, actor, reason, at) {
                Ok((_, changed)) => BulkResult::applied(id, changed),
                Err(error) => {
                    tracing::warn!(
                        entity_type = %E::ENTITY_TYPE,
                        id = %id,
                        kind = %error.kind(),
                        "bulk item failed: {error}"
                    );
                    BulkResult::failed(id, &error)
                }
            };
            results.push(result);
        }

        let outcome = BulkOutcome {
            entity_type: E::ENTITY_TYPE,
            target: target.to_string(),
            results,
        };
        tracing::info!(
            entity_type = %E::ENTITY_TYPE,
            total = outcome.results.len(),
            succeeded = outcome.succeeded(),
            "{}",
            outcome.summary()
        );
        outcome
    }

    fn apply_tracked<E, S>(
        &self,
        store: &mut S,
        id: &str,
        target: E::Status,
        actor: &Actor,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<(E, bool), TransitionError>
    where
        E: Approvable,
        S: EntityStore<E> + ?Sized,
    {
        let current = store
            .load(id)
            .map_err(|error| error.into_transition_error(E::ENTITY_TYPE, id))?;
        let next = self
            .machine
            .apply_transition(&current, target, actor, reason, at)?;

        let changed = next.status() != current.status();
        if changed {
            store
                .compare_and_swap(current.status(), &next)
                .map_err(|error| error.into_transition_error(E::ENTITY_TYPE, id))?;
        }
        Ok((next, changed))
    }
}
