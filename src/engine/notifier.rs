//! Commit hooks invoked once per accepted live transition.
//!
//! The orchestrator calls exactly one notifier after the machine accepts an
//! event. Replay never reaches it. Swapping the notifier changes the commit
//! strategy without touching the machine or the orchestrator.

use crate::core::State;
use crate::persistence::{OrderId, PersistenceError, PersistenceGateway};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Receives every accepted live transition, including ones whose target
/// equals their source.
pub trait ChangeNotifier<S: State>: Send + Sync {
    fn on_transition(&self, id: &OrderId, previous: &S, new_state: &S)
        -> Result<(), PersistenceError>;
}

/// Commits the new state through a persistence gateway.
///
/// A transition that leaves the state unchanged is not written unless
/// [`PersistingNotifier::with_skip_unchanged`] turns the skip off.
pub struct PersistingNotifier<G> {
    gateway: Arc<G>,
    skip_unchanged: bool,
}

impl<G> PersistingNotifier<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            skip_unchanged: true,
        }
    }

    pub fn with_skip_unchanged(mut self, enabled: bool) -> Self {
        self.skip_unchanged = enabled;
        self
    }
}

impl<S: State, G: PersistenceGateway<S>> ChangeNotifier<S> for PersistingNotifier<G> {
    fn on_transition(
        &self,
        id: &OrderId,
        previous: &S,
        new_state: &S,
    ) -> Result<(), PersistenceError> {
        if self.skip_unchanged && previous == new_state {
            debug!(order_id = %id, state = new_state.name(), "state unchanged, write skipped");
            return Ok(());
        }
        self.gateway.save(id, new_state)
    }
}

/// One notifier invocation as seen by [`AuditingNotifier`].
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub order_id: OrderId,
    pub from: String,
    pub state: String,
    pub at: DateTime<Utc>,
    /// `None` when the wrapped notifier committed successfully.
    pub error: Option<String>,
}

impl AuditEntry {
    pub fn committed(&self) -> bool {
        self.error.is_none()
    }
}

/// Wraps another notifier and keeps an audit trail of every commit attempt.
pub struct AuditingNotifier<N> {
    inner: N,
    entries: Mutex<Vec<AuditEntry>>,
}

impl<N> AuditingNotifier<N> {
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the trail, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<S: State, N: ChangeNotifier<S>> ChangeNotifier<S> for AuditingNotifier<N> {
    fn on_transition(
        &self,
        id: &OrderId,
        previous: &S,
        new_state: &S,
    ) -> Result<(), PersistenceError> {
        let result = self.inner.on_transition(id, previous, new_state);
        let entry = AuditEntry {
            order_id: *id,
            from: previous.name().to_string(),
            state: new_state.name().to_string(),
            at: Utc::now(),
            error: result.as_ref().err().map(ToString::to_string),
        };
        debug!(order_id = %id, state = new_state.name(), committed = entry.committed(), "audited");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryGateway;
    use crate::table::OrderState;

    #[test]
    fn persisting_notifier_saves_through_gateway() {
        let gateway = Arc::new(MemoryGateway::new());
        let id = gateway.create_order().unwrap();
        let notifier = PersistingNotifier::new(Arc::clone(&gateway));

        notifier
            .on_transition(&id, &OrderState::Created, &OrderState::Paid)
            .unwrap();

        assert_eq!(gateway.load(&id).unwrap(), Some(OrderState::Paid));
    }

    #[test]
    fn persisting_notifier_skips_unchanged_state_by_default() {
        let gateway = Arc::new(MemoryGateway::new());
        let id = gateway.create(OrderState::Paid).unwrap();
        let notifier = PersistingNotifier::new(Arc::clone(&gateway));

        notifier
            .on_transition(&id, &OrderState::Paid, &OrderState::Paid)
            .unwrap();

        assert!(gateway.record(&id).unwrap().unwrap().updated_at.is_none());
    }

    #[test]
    fn persisting_notifier_can_write_unchanged_state() {
        let gateway = Arc::new(MemoryGateway::new());
        let id = gateway.create(OrderState::Paid).unwrap();
        let notifier = PersistingNotifier::new(Arc::clone(&gateway)).with_skip_unchanged(false);

        notifier
            .on_transition(&id, &OrderState::Paid, &OrderState::Paid)
            .unwrap();

        assert!(gateway.record(&id).unwrap().unwrap().updated_at.is_some());
    }

    #[test]
    fn auditing_notifier_records_success_and_failure() {
        let gateway = Arc::new(MemoryGateway::new());
        let id = gateway.create_order().unwrap();
        let missing = OrderId::new();
        let notifier = AuditingNotifier::new(PersistingNotifier::new(Arc::clone(&gateway)));

        notifier
            .on_transition(&id, &OrderState::Created, &OrderState::Paid)
            .unwrap();
        let failed = notifier.on_transition(&missing, &OrderState::Created, &OrderState::Paid);

        assert_eq!(failed, Err(PersistenceError::Missing { id: missing }));
        let entries = notifier.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].committed());
        assert_eq!(entries[0].from, "CREATED");
        assert_eq!(entries[0].state, "PAID");
        assert!(!entries[1].committed());
        assert_eq!(entries[1].order_id, missing);
    }
}
