//! Static transition tables.
//!
//! A table is a fixed directed graph `state × event → state` known at build
//! time. It is the single source of truth for legality: the path finder,
//! the machine instance and the coverage check all ask [`TransitionTable::next`]
//! instead of re-deriving rules.
//!
//! # Example
//!
//! ```rust
//! use order_lifecycle::table::{OrderEvent, OrderState, OrderTable, TransitionTable};
//!
//! let table = OrderTable;
//! assert_eq!(table.next(&OrderState::Created, &OrderEvent::Pay), Some(OrderState::Paid));
//! assert_eq!(table.next(&OrderState::Created, &OrderEvent::Deliver), None);
//! ```

mod coverage;
mod order;

pub use coverage::{check_table, TableViolation};
pub use order::{OrderEvent, OrderState, OrderTable, ORDER_RULES};

use crate::core::{Event, State};

/// An allowed `(source, event) → target` mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRule<S: State, E: Event> {
    pub source: S,
    pub event: E,
    pub target: S,
}

impl<S: State, E: Event> TransitionRule<S, E> {
    pub const fn new(source: S, event: E, target: S) -> Self {
        Self {
            source,
            event,
            target,
        }
    }

    /// Whether this rule handles `event` from `source`.
    pub fn matches(&self, source: &S, event: &E) -> bool {
        self.source == *source && self.event == *event
    }
}

/// A fixed, immutable transition graph.
///
/// Implementations only enumerate their states and rules; lookups are
/// provided. Tables are read-only and shared freely across threads.
pub trait TransitionTable: Send + Sync {
    type State: State;
    type Event: Event;

    /// The state every aggregate starts in.
    fn initial(&self) -> Self::State;

    /// Every state of the closed state set.
    fn states(&self) -> &[Self::State];

    /// Every rule, in enumeration order.
    fn rules(&self) -> &[TransitionRule<Self::State, Self::Event>];

    /// Look up the target of `event` applied in `source`.
    ///
    /// Returns `None` for final sources and for pairs absent from the rule
    /// set. Pure and stateless.
    fn next(&self, source: &Self::State, event: &Self::Event) -> Option<Self::State> {
        if source.is_final() {
            return None;
        }
        self.rules()
            .iter()
            .find(|rule| rule.matches(source, event))
            .map(|rule| rule.target.clone())
    }

    /// Events with a rule from `source`, in enumeration order.
    fn events_from(&self, source: &Self::State) -> Vec<Self::Event> {
        self.rules()
            .iter()
            .filter(|rule| rule.source == *source)
            .map(|rule| rule.event.clone())
            .collect()
    }
}
