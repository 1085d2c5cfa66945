//! Single-use machine instance.

use super::path::PathFinder;
use crate::core::{Event, State, StateHistory, TransitionRecord};
use crate::table::TransitionTable;
use chrono::Utc;
use thiserror::Error;
use tracing::trace;

/// Errors raised while replaying a machine to a persisted state.
///
/// Any of these means the table and the stored state disagree. They are
/// internal-consistency faults, never ordinary rejections.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReplayError {
    #[error("Replay must start from '{initial}', machine is in '{current}'")]
    NotAtInitial { initial: String, current: String },

    #[error("No path from the initial state to '{target}'")]
    Unreachable { target: String },

    #[error("Replayed event '{event}' rejected in '{state}' on the way to '{target}'")]
    Rejected {
        event: String,
        state: String,
        target: String,
    },
}

/// Ephemeral holder of one current state.
///
/// Created fresh for every operation, starts in the table's initial state
/// and is dropped when the operation ends. It never touches storage.
pub struct MachineInstance<'t, T: TransitionTable> {
    table: &'t T,
    current: T::State,
    history: StateHistory<T::State, T::Event>,
}

impl<'t, T: TransitionTable> MachineInstance<'t, T> {
    /// Create a machine in the table's initial state.
    pub fn new(table: &'t T) -> Self {
        Self {
            table,
            current: table.initial(),
            history: StateHistory::new(),
        }
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &T::State {
        &self.current
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Accepted events so far, replayed ones included.
    pub fn history(&self) -> &StateHistory<T::State, T::Event> {
        &self.history
    }

    /// Apply one event.
    ///
    /// On acceptance the current state moves to the rule's target and `true`
    /// is returned. A rejected event leaves the state untouched.
    pub fn apply(&mut self, event: T::Event) -> bool {
        self.step(event, false)
    }

    /// Bring a fresh machine to `target` by re-applying the shortest event
    /// sequence from the initial state.
    ///
    /// Replay is silent: it records history but nothing observes it. Fails
    /// fast on the first rejected event.
    pub fn replay_to(
        &mut self,
        target: &T::State,
        finder: &PathFinder<'_, T>,
    ) -> Result<(), ReplayError> {
        let initial = self.table.initial();
        if self.current != initial {
            return Err(ReplayError::NotAtInitial {
                initial: initial.name().to_string(),
                current: self.current.name().to_string(),
            });
        }

        let path = finder
            .path_to(target)
            .ok_or_else(|| ReplayError::Unreachable {
                target: target.name().to_string(),
            })?;

        for event in path {
            if !self.step(event.clone(), true) {
                return Err(ReplayError::Rejected {
                    event: event.name().to_string(),
                    state: self.current.name().to_string(),
                    target: target.name().to_string(),
                });
            }
        }

        Ok(())
    }

    fn step(&mut self, event: T::Event, replayed: bool) -> bool {
        let Some(target) = self.table.next(&self.current, &event) else {
            trace!(
                state = self.current.name(),
                event = event.name(),
                replayed,
                "event rejected"
            );
            return false;
        };

        let record = TransitionRecord {
            from: self.current.clone(),
            event,
            to: target.clone(),
            timestamp: Utc::now(),
            replayed,
        };
        self.history = self.history.record(record);
        self.current = target;
        true
    }
}

impl<T: TransitionTable> Drop for MachineInstance<'_, T> {
    fn drop(&mut self) {
        trace!(
            state = self.current.name(),
            transitions = self.history.transitions().len(),
            "machine instance discarded"
        );
    }
}
