//! State and Event traits for transition tables.
//!
//! Every table is expressed over a pair of closed value sets: the states an
//! aggregate can rest in and the events that move it between them. Both are
//! plain values with pure inspection methods.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for lifecycle states.
///
/// All methods are pure - no side effects. States are small immutable values
/// describing where an aggregate currently sits in its lifecycle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into machine instances and history records
/// - `Eq` + `Hash`: path search keeps a visited set keyed by state
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states are what the backing store holds
///
/// # Example
///
/// ```rust
/// use order_lifecycle::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TicketState {
///     Open,
///     Resolved,
///     Rejected,
/// }
///
/// impl State for TicketState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Resolved => "Resolved",
///             Self::Rejected => "Rejected",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Resolved | Self::Rejected)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Rejected)
///     }
/// }
///
/// assert!(TicketState::Rejected.is_final());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states have no outgoing transitions. A table that declares one
    /// is rejected by the coverage check.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for events that request a transition.
///
/// ```rust
/// use order_lifecycle::core::Event;
///
/// #[derive(Clone, PartialEq, Eq, Debug)]
/// enum TicketEvent {
///     Resolve,
/// }
///
/// impl Event for TicketEvent {
///     fn name(&self) -> &str {
///         "Resolve"
///     }
/// }
///
/// assert_eq!(TicketEvent::Resolve.name(), "Resolve");
/// ```
pub trait Event: Clone + Eq + Debug + Send + Sync {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
