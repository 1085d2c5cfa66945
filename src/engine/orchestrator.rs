//! The stateless orchestrator.
//!
//! Every operation re-reads the stored state, rebuilds a throwaway machine
//! by replaying the shortest path to it, applies one live event and commits
//! the result through the change notifier. Nothing is cached between calls.

use super::config::EngineConfig;
use super::error::EngineError;
use super::locks::KeyedLocks;
use super::notifier::{ChangeNotifier, PersistingNotifier};
use crate::builder::{BuildError, EngineBuilder};
use crate::core::{Event, State};
use crate::machine::{MachineInstance, PathFinder};
use crate::persistence::{OrderId, PersistenceGateway};
use crate::table::{OrderEvent, OrderState, OrderTable, TransitionTable};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Orchestrator wired to the order lifecycle table.
pub type OrderEngine<G, N = PersistingNotifier<G>> = Orchestrator<OrderTable, G, N>;

/// Drives event-triggered transitions for aggregates held in a gateway.
pub struct Orchestrator<T, G, N> {
    table: T,
    gateway: Arc<G>,
    notifier: N,
    config: EngineConfig,
    locks: KeyedLocks,
}

impl<T, G, N> Orchestrator<T, G, N>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
    N: ChangeNotifier<T::State>,
{
    pub(crate) fn from_parts(table: T, gateway: Arc<G>, notifier: N, config: EngineConfig) -> Self {
        Self {
            table,
            gateway,
            notifier,
            config,
            locks: KeyedLocks::new(),
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply `event` to the order `id` and return the committed state.
    ///
    /// The state returned is re-read from the gateway after the commit, not
    /// taken from the machine. Every accepted event reaches the notifier
    /// exactly once; a rejected event reaches nothing.
    #[instrument(skip_all, fields(event = event.name(), order_id = %id))]
    pub fn trigger_event_with_result(
        &self,
        event: T::Event,
        id: &OrderId,
    ) -> Result<T::State, EngineError> {
        let _guard = self
            .config
            .per_order_locking
            .then(|| self.locks.acquire(*id));

        let stored = self.load(id)?.ok_or_else(|| {
            debug!("order not found");
            EngineError::NotFound { id: *id }
        })?;
        debug!(state = stored.name(), "loaded");

        let mut machine = MachineInstance::new(&self.table);
        if stored != self.table.initial() {
            let finder = PathFinder::new(&self.table);
            machine.replay_to(&stored, &finder).map_err(|source| {
                error!(state = stored.name(), error = %source, "machine replay diverged from table");
                EngineError::SyncFailure {
                    id: *id,
                    state: stored.name().to_string(),
                    source,
                }
            })?;
            debug!(
                replayed = machine.history().replayed_len(),
                "machine synchronized"
            );
        }

        if !machine.apply(event.clone()) {
            warn!(state = stored.name(), "event not accepted");
            return Err(EngineError::InvalidTransition {
                event: event.name().to_string(),
                state: stored.name().to_string(),
            });
        }

        let next = machine.current_state().clone();
        drop(machine);

        self.notifier
            .on_transition(id, &stored, &next)
            .map_err(|source| {
                error!(to = next.name(), error = %source, "commit failed");
                EngineError::PersistenceFailure { id: *id, source }
            })?;

        let committed = self.load(id)?.ok_or_else(|| {
            warn!("order vanished after commit");
            EngineError::VanishedDuringTransition { id: *id }
        })?;

        info!(from = stored.name(), to = committed.name(), "transition committed");
        Ok(committed)
    }

    /// Apply `event` and report only whether it was accepted and committed.
    pub fn trigger_event(&self, event: T::Event, id: &OrderId) -> bool {
        self.trigger_event_with_result(event, id).is_ok()
    }

    /// Stored state of `id`, read through the gateway.
    pub fn current_state(&self, id: &OrderId) -> Result<T::State, EngineError> {
        self.load(id)?.ok_or(EngineError::NotFound { id: *id })
    }

    fn load(&self, id: &OrderId) -> Result<Option<T::State>, EngineError> {
        self.gateway.load(id).map_err(|source| {
            error!(order_id = %id, error = %source, "load failed");
            EngineError::PersistenceFailure { id: *id, source }
        })
    }
}

impl<T, G> Orchestrator<T, G, PersistingNotifier<G>>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
{
    /// Build an orchestrator that commits through `gateway` itself.
    pub fn persisting(table: T, gateway: Arc<G>, config: EngineConfig) -> Result<Self, BuildError> {
        EngineBuilder::persisting(table, gateway).config(config).build()
    }
}

impl<G, N> Orchestrator<OrderTable, G, N>
where
    G: PersistenceGateway<OrderState>,
    N: ChangeNotifier<OrderState>,
{
    pub fn process_payment(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::Pay, id)
    }

    pub fn start_preparation(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::StartPreparation, id)
    }

    pub fn mark_ready_for_delivery(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::ReadyForDelivery, id)
    }

    pub fn start_delivery(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::StartDelivery, id)
    }

    pub fn complete_delivery(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::Deliver, id)
    }

    pub fn cancel_order(&self, id: &OrderId) -> Result<OrderState, EngineError> {
        self.trigger_event_with_result(OrderEvent::Cancel, id)
    }
}
