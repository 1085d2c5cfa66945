//! Event-triggered transitions for persisted aggregates.
//!
//! The [`Orchestrator`] ties a transition table, a persistence gateway and a
//! change notifier together. It holds no per-order state of its own.

mod config;
mod error;
mod locks;
mod notifier;
mod orchestrator;

pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, ErrorKind};
pub use notifier::{AuditEntry, AuditingNotifier, ChangeNotifier, PersistingNotifier};
pub use orchestrator::{OrderEngine, Orchestrator};
