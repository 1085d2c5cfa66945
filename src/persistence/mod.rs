//! Persistence of the single "current state" attribute of an aggregate.
//!
//! The engine treats the aggregate as a key-value pair `(id) -> state`.
//! Everything else about the record belongs to the owning application. A
//! gateway is synchronous and never caches across calls.

use crate::core::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod error;
pub mod memory;
pub mod snapshot;

pub use error::{PersistenceError, SnapshotError};
pub use memory::MemoryGateway;
pub use snapshot::{StoreSnapshot, SNAPSHOT_VERSION};

/// Identifier of an externally owned order aggregate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// What a store keeps per aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct OrderRecord<S: State> {
    /// Current lifecycle state
    pub state: S,
    /// When the aggregate was first stored
    pub created_at: DateTime<Utc>,
    /// Last time the state was written, `None` until the first transition
    pub updated_at: Option<DateTime<Utc>>,
}

impl<S: State> OrderRecord<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Reads and writes the current state of an aggregate.
///
/// # Example
///
/// ```rust
/// use order_lifecycle::persistence::{MemoryGateway, PersistenceGateway};
/// use order_lifecycle::table::OrderState;
///
/// let gateway = MemoryGateway::new();
/// let id = gateway.create_order().unwrap();
///
/// assert_eq!(gateway.load(&id).unwrap(), Some(OrderState::Created));
/// gateway.save(&id, &OrderState::Paid).unwrap();
/// assert_eq!(gateway.load(&id).unwrap(), Some(OrderState::Paid));
/// ```
pub trait PersistenceGateway<S: State>: Send + Sync {
    /// Current state of `id`, or `None` when no such aggregate exists.
    fn load(&self, id: &OrderId) -> Result<Option<S>, PersistenceError>;

    /// Write a new state for an existing aggregate.
    ///
    /// Fails with [`PersistenceError::Missing`] when the aggregate is gone.
    fn save(&self, id: &OrderId, state: &S) -> Result<(), PersistenceError>;
}
