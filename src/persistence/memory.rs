//! In-memory persistence gateway.
//!
//! Stores records in a `HashMap` behind a read-write lock. Fast and shared
//! safely between threads, with no durability beyond [`StoreSnapshot`]s.

use super::{OrderId, OrderRecord, PersistenceError, PersistenceGateway, StoreSnapshot};
use crate::core::State;
use crate::table::OrderState;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// In-memory gateway implementation.
pub struct MemoryGateway<S: State> {
    records: RwLock<HashMap<OrderId, OrderRecord<S>>>,
}

impl<S: State> MemoryGateway<S> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Store a new aggregate in `state` under a fresh identifier.
    pub fn create(&self, state: S) -> Result<OrderId, PersistenceError> {
        let id = OrderId::new();
        self.insert(id, state)?;
        Ok(id)
    }

    /// Store an aggregate under `id`, replacing any existing record.
    pub fn insert(&self, id: OrderId, state: S) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::Poisoned)?;
        records.insert(id, OrderRecord::new(state));
        Ok(())
    }

    /// Delete an aggregate, returning its last record.
    pub fn remove(&self, id: &OrderId) -> Result<Option<OrderRecord<S>>, PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::Poisoned)?;
        Ok(records.remove(id))
    }

    /// Full record of an aggregate, timestamps included.
    pub fn record(&self, id: &OrderId) -> Result<Option<OrderRecord<S>>, PersistenceError> {
        let records = self.records.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(records.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capture every record.
    pub fn snapshot(&self) -> Result<StoreSnapshot<S>, PersistenceError> {
        let records = self.records.read().map_err(|_| PersistenceError::Poisoned)?;
        let mut entries: Vec<_> = records
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        Ok(StoreSnapshot::new(entries))
    }

    /// Replace every record with the contents of `snapshot`.
    pub fn restore(&self, snapshot: StoreSnapshot<S>) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::Poisoned)?;
        *records = snapshot.records.into_iter().collect();
        debug!(records = records.len(), snapshot = %snapshot.id, "store restored");
        Ok(())
    }
}

impl MemoryGateway<OrderState> {
    /// Store a new order in `CREATED`.
    pub fn create_order(&self) -> Result<OrderId, PersistenceError> {
        self.create(OrderState::Created)
    }
}

impl<S: State> Default for MemoryGateway<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> PersistenceGateway<S> for MemoryGateway<S> {
    fn load(&self, id: &OrderId) -> Result<Option<S>, PersistenceError> {
        let records = self.records.read().map_err(|_| PersistenceError::Poisoned)?;
        Ok(records.get(id).map(|record| record.state.clone()))
    }

    fn save(&self, id: &OrderId, state: &S) -> Result<(), PersistenceError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistenceError::Poisoned)?;
        let record = records
            .get_mut(id)
            .ok_or(PersistenceError::Missing { id: *id })?;

        debug!(
            order_id = %id,
            from = record.state.name(),
            to = state.name(),
            "persisting state"
        );
        record.state = state.clone();
        record.updated_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_order_starts_without_update_stamp() {
        let gateway = MemoryGateway::new();
        let id = gateway.create_order().unwrap();

        let record = gateway.record(&id).unwrap().unwrap();
        assert_eq!(record.state, OrderState::Created);
        assert!(record.updated_at.is_none());
        assert_eq!(gateway.len(), 1);
    }

    #[test]
    fn save_overwrites_state_and_stamps_update() {
        let gateway = MemoryGateway::new();
        let id = gateway.create_order().unwrap();

        gateway.save(&id, &OrderState::Paid).unwrap();

        let record = gateway.record(&id).unwrap().unwrap();
        assert_eq!(record.state, OrderState::Paid);
        assert!(record.updated_at.is_some());
    }

    #[test]
    fn load_of_unknown_id_is_none() {
        let gateway: MemoryGateway<OrderState> = MemoryGateway::new();
        assert_eq!(gateway.load(&OrderId::new()).unwrap(), None);
    }

    #[test]
    fn save_to_removed_order_fails() {
        let gateway = MemoryGateway::new();
        let id = gateway.create_order().unwrap();
        gateway.remove(&id).unwrap();

        let result = gateway.save(&id, &OrderState::Paid);
        assert_eq!(result, Err(PersistenceError::Missing { id }));
        assert!(gateway.is_empty());
    }

    #[test]
    fn snapshot_and_restore_replace_contents() {
        let gateway = MemoryGateway::new();
        let paid = gateway.create_order().unwrap();
        gateway.save(&paid, &OrderState::Paid).unwrap();
        let snapshot = gateway.snapshot().unwrap();

        let fresh = MemoryGateway::new();
        let stray = fresh.create_order().unwrap();
        fresh.restore(snapshot).unwrap();

        assert_eq!(fresh.load(&paid).unwrap(), Some(OrderState::Paid));
        assert_eq!(fresh.load(&stray).unwrap(), None);
        assert_eq!(fresh.len(), 1);
    }
}
