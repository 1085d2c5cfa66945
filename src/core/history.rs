//! Transition history tracking for machine instances.
//!
//! Provides immutable tracking of the events a machine instance accepted,
//! including the ones applied while replaying to a persisted state.

use super::state::{Event, State};
use chrono::{DateTime, Utc};

/// Record of a single accepted event.
///
/// # Example
///
/// ```rust
/// use order_lifecycle::core::TransitionRecord;
/// use order_lifecycle::table::{OrderEvent, OrderState};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: OrderState::Created,
///     event: OrderEvent::Pay,
///     to: OrderState::Paid,
///     timestamp: Utc::now(),
///     replayed: false,
/// };
/// assert!(!record.replayed);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionRecord<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The event that was accepted
    pub event: E,
    /// The state being transitioned to
    pub to: S,
    /// When the event was applied
    pub timestamp: DateTime<Utc>,
    /// Whether the event was applied during replay rather than live
    pub replayed: bool,
}

/// Ordered history of accepted events.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
#[derive(Clone, Debug)]
pub struct StateHistory<S: State, E: Event> {
    transitions: Vec<TransitionRecord<S, E>>,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: TransitionRecord<S, E>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the first `from` state, then
    /// the `to` state of each transition.
    ///
    /// ```rust
    /// use order_lifecycle::core::{StateHistory, TransitionRecord};
    /// use order_lifecycle::table::{OrderEvent, OrderState};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new()
    ///     .record(TransitionRecord {
    ///         from: OrderState::Created,
    ///         event: OrderEvent::Pay,
    ///         to: OrderState::Paid,
    ///         timestamp: Utc::now(),
    ///         replayed: true,
    ///     })
    ///     .record(TransitionRecord {
    ///         from: OrderState::Paid,
    ///         event: OrderEvent::Cancel,
    ///         to: OrderState::Cancelled,
    ///         timestamp: Utc::now(),
    ///         replayed: false,
    ///     });
    ///
    /// let path = history.get_path();
    /// assert_eq!(path, vec![&OrderState::Created, &OrderState::Paid, &OrderState::Cancelled]);
    /// ```
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Events applied live, excluding replay.
    pub fn live(&self) -> impl Iterator<Item = &TransitionRecord<S, E>> {
        self.transitions.iter().filter(|t| !t.replayed)
    }

    /// Number of events applied during replay.
    pub fn replayed_len(&self) -> usize {
        self.transitions.iter().filter(|t| t.replayed).count()
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[TransitionRecord<S, E>] {
        &self.transitions
    }
}
