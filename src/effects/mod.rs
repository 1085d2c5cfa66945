//! Orchestrator operations as Stillwater effects.
//!
//! This is the async boundary of the crate. Each effect wraps one complete
//! synchronous orchestrator call and takes the shared orchestrator as its
//! environment, so callers can compose transitions with other effects.
//! Nothing inside the engine suspends.
//!
//! Running an effect blocks the executing thread for the whole call,
//! including the wait on the per-order lock while another caller holds the
//! same order. On a busy runtime, or when many tasks target one order, run
//! the effect inside `tokio::task::spawn_blocking` and drive it there with
//! `Handle::block_on`.
//!
//! # Example
//!
//! ```rust
//! use order_lifecycle::effects::trigger;
//! use order_lifecycle::engine::{EngineConfig, Orchestrator};
//! use order_lifecycle::persistence::MemoryGateway;
//! use order_lifecycle::table::{OrderEvent, OrderState, OrderTable};
//! use std::sync::Arc;
//! use stillwater::effect::Effect;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = Arc::new(MemoryGateway::new());
//! let engine = Arc::new(
//!     Orchestrator::persisting(OrderTable, Arc::clone(&gateway), EngineConfig::default()).unwrap(),
//! );
//! let id = gateway.create_order().unwrap();
//!
//! let state = trigger(OrderEvent::Pay, id).run(&engine).await;
//! assert_eq!(state, Ok(OrderState::Paid));
//! # }
//! ```

use crate::engine::{ChangeNotifier, EngineError, Orchestrator};
use crate::persistence::{OrderId, PersistenceGateway};
use crate::table::TransitionTable;
use std::convert::Infallible;
use std::sync::Arc;
use stillwater::effect::{from_fn, Effect};

/// Environment every effect in this module runs against.
pub type EngineEnv<T, G, N> = Arc<Orchestrator<T, G, N>>;

/// Apply `event` to `id` and yield the committed state.
pub fn trigger<T, G, N>(
    event: T::Event,
    id: OrderId,
) -> impl Effect<Output = T::State, Error = EngineError, Env = EngineEnv<T, G, N>>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
    N: ChangeNotifier<T::State>,
{
    from_fn(move |engine: &EngineEnv<T, G, N>| engine.trigger_event_with_result(event, &id))
}

/// Apply `event` to `id` and yield whether it was accepted and committed.
pub fn trigger_accepted<T, G, N>(
    event: T::Event,
    id: OrderId,
) -> impl Effect<Output = bool, Error = Infallible, Env = EngineEnv<T, G, N>>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
    N: ChangeNotifier<T::State>,
{
    from_fn(move |engine: &EngineEnv<T, G, N>| Ok(engine.trigger_event(event, &id)))
}
