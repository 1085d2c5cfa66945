//! Order Lifecycle: a replay-based transition engine for persisted orders
//!
//! The engine keeps no per-order state in memory. Each operation loads the
//! stored state, rebuilds a fresh machine by replaying the shortest event
//! path from the initial state, applies one event and commits the result
//! through a change notifier. The static transition table is the only
//! source of truth for which events are legal.
//!
//! # Core Concepts
//!
//! - **Table**: the fixed `state × event → state` graph, checked for total
//!   coverage when an engine is built
//! - **Path finder**: breadth-first search for the shortest replay path
//! - **Machine instance**: a throwaway machine living for one operation
//! - **Gateway / notifier**: load and commit the single state attribute
//! - **Orchestrator**: ties the above together per event
//!
//! # Example
//!
//! ```rust
//! use order_lifecycle::{EngineConfig, EngineError, MemoryGateway, OrderState, OrderTable, Orchestrator};
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(MemoryGateway::new());
//! let engine = Orchestrator::persisting(OrderTable, Arc::clone(&gateway), EngineConfig::default())?;
//!
//! let id = gateway.create_order()?;
//! assert_eq!(engine.process_payment(&id)?, OrderState::Paid);
//! assert_eq!(engine.start_preparation(&id)?, OrderState::InPreparation);
//!
//! // DELIVER is not legal from IN_PREPARATION; nothing is written.
//! let rejected = engine.complete_delivery(&id);
//! assert!(matches!(rejected, Err(EngineError::InvalidTransition { .. })));
//! assert_eq!(engine.current_state(&id)?, OrderState::InPreparation);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod engine;
pub mod machine;
pub mod persistence;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, EngineBuilder};
pub use crate::core::{Event, State, StateHistory, TransitionRecord};
pub use engine::{
    ChangeNotifier, EngineConfig, EngineError, ErrorKind, OrderEngine, Orchestrator,
    PersistingNotifier,
};
pub use machine::{MachineInstance, PathFinder, ReplayError};
pub use persistence::{MemoryGateway, OrderId, PersistenceError, PersistenceGateway};
pub use table::{OrderEvent, OrderState, OrderTable, TransitionRule, TransitionTable};
