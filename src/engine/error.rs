//! Tagged errors returned by the orchestrator.

use crate::machine::ReplayError;
use crate::persistence::{OrderId, PersistenceError};
use thiserror::Error;

/// Why a triggered event did not produce a committed state.
///
/// None of these are retried by the engine; retry policy belongs to the
/// caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("Order {id} not found")]
    NotFound { id: OrderId },

    #[error("Event '{event}' is not accepted in state '{state}'")]
    InvalidTransition { event: String, state: String },

    #[error("Could not synchronize order {id} to stored state '{state}': {source}")]
    SyncFailure {
        id: OrderId,
        state: String,
        source: ReplayError,
    },

    /// The store failed to read or write. A transition accepted in memory
    /// is not durable when this is returned.
    #[error("Persistence failed for order {id}: {source}")]
    PersistenceFailure {
        id: OrderId,
        source: PersistenceError,
    },

    #[error("Order {id} disappeared during state transition")]
    VanishedDuringTransition { id: OrderId },
}

/// Discriminant of [`EngineError`] for callers that branch on error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    SyncFailure,
    PersistenceFailure,
    VanishedDuringTransition,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::SyncFailure { .. } => ErrorKind::SyncFailure,
            Self::PersistenceFailure { .. } => ErrorKind::PersistenceFailure,
            Self::VanishedDuringTransition { .. } => ErrorKind::VanishedDuringTransition,
        }
    }

    /// Whether the error signals a table/search divergence rather than a
    /// caller or store problem.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::SyncFailure { .. })
    }
}
