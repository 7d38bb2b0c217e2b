//! Storage seam for approvable records.
//!
//! Persistence lives outside the engine. Bulk processing only needs to load
//! a record and write it back with a compare-and-swap on the status it read,
//! so two actors racing on one record cannot both win.

use thiserror::Error;

use crate::approval::Approvable;
use crate::enums::EntityType;
use crate::errors::TransitionError;

/// Errors a store reports back to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record {id} not found")]
    NotFound { id: String },

    /// The stored status no longer matches the one the caller read.
    #[error("record {id} is {actual}, expected {expected}")]
    Conflict {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Attach entity context and lift into the transition error taxonomy.
    #[must_use]
    pub fn into_transition_error(self, entity_type: EntityType, id: &str) -> TransitionError {
        match self {
            Self::NotFound { .. } => TransitionError::NotFound {
                entity_type,
                id: id.to_string(),
            },
            Self::Conflict {
                expected, actual, ..
            } => TransitionError::Conflict {
                entity_type,
                id: id.to_string(),
                expected,
                actual,
            },
            Self::Unavailable(message) => TransitionError::StoreUnavailable {
                entity_type,
                id: id.to_string(),
                message,
            },
        }
    }
}

/// Loads records and persists transitions with optimistic concurrency.
pub trait EntityStore<E: Approvable> {
    /// Current snapshot of the record with `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no such record exists, `Unavailable` on backend failure.
    fn load(&self, id: &str) -> Result<E, StoreError>;

    /// Replace the stored record with `updated` only if its status is still
    /// `expected`.
    ///
    /// # Errors
    ///
    /// `Conflict` when the stored status differs from `expected`.
    fn compare_and_swap(&mut self, expected: E::Status, updated: &E) -> Result<(), StoreError>;
}

/// Ordered in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryStore<E> {
    records: Vec<E>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E: Approvable> MemoryStore<E> {
    #[must_use]
    pub const fn new(records: Vec<E>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&E> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Insert `record`, replacing any existing record with the same ID.
    pub fn upsert(&mut self, record: E) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[E] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<E> {
        self.records
    }
}

impl<E: Approvable> EntityStore<E> for MemoryStore<E> {
    fn load(&self, id: &str) -> Result<E, StoreError> {
        self.get(id).cloned().ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    fn compare_and_swap(&mut self, expected: E::Status, updated: &E) -> Result<(), StoreError> {
        let slot = self
            .records
            .iter_mut()
            .find(|record| record.id() == updated.id())
            .ok_or_else(|| StoreError::NotFound {
                id: updated.id().to_string(),
            })?;

        if slot.status() != expected {
            return Err(StoreError::Conflict {
                id: updated.id().to_string(),
                expected: expected.to_string(),
                actual: slot.status().to_string(),
            });
        }

        *slot = updated.clone();
        Ok(())
    }
}
