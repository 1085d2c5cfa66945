//! Breadth-first search over a transition table.

use crate::table::TransitionTable;
use std::collections::{HashMap, HashSet, VecDeque};

/// Finds the shortest event sequence from a table's initial state.
///
/// Generic over the table so it can be exercised without any storage or
/// orchestration around it. Ties between equally short paths are broken by
/// rule enumeration order.
///
/// # Example
///
/// ```rust
/// use order_lifecycle::machine::PathFinder;
/// use order_lifecycle::table::{OrderEvent, OrderState, OrderTable};
///
/// let table = OrderTable;
/// let finder = PathFinder::new(&table);
///
/// assert_eq!(finder.path_to(&OrderState::Created), Some(vec![]));
/// assert_eq!(
///     finder.path_to(&OrderState::InPreparation),
///     Some(vec![OrderEvent::Pay, OrderEvent::StartPreparation])
/// );
/// ```
pub struct PathFinder<'t, T: TransitionTable> {
    table: &'t T,
}

impl<'t, T: TransitionTable> PathFinder<'t, T> {
    pub fn new(table: &'t T) -> Self {
        Self { table }
    }

    /// Shortest event sequence reaching `target`, or `None` if unreachable.
    pub fn path_to(&self, target: &T::State) -> Option<Vec<T::Event>> {
        let initial = self.table.initial();
        if *target == initial {
            return Some(Vec::new());
        }

        let mut parents: HashMap<T::State, (T::State, T::Event)> = HashMap::new();
        let mut visited: HashSet<T::State> = HashSet::from([initial.clone()]);
        let mut queue = VecDeque::from([initial]);

        while let Some(state) = queue.pop_front() {
            for event in self.table.events_from(&state) {
                let Some(next) = self.table.next(&state, &event) else {
                    continue;
                };
                if !visited.insert(next.clone()) {
                    continue;
                }
                parents.insert(next.clone(), (state.clone(), event));
                if next == *target {
                    return Some(unwind(&parents, next));
                }
                queue.push_back(next);
            }
        }

        None
    }

    /// Every state reachable from the initial state, in discovery order.
    pub fn reachable_states(&self) -> Vec<T::State> {
        let initial = self.table.initial();
        let mut visited: HashSet<T::State> = HashSet::from([initial.clone()]);
        let mut order = vec![initial.clone()];
        let mut queue = VecDeque::from([initial]);

        while let Some(state) = queue.pop_front() {
            for event in self.table.events_from(&state) {
                if let Some(next) = self.table.next(&state, &event) {
                    if visited.insert(next.clone()) {
                        order.push(next.clone());
                        queue.push_back(next);
                    }
                }
            }
        }

        order
    }
}

// Walk parent links back to the initial state, which has no parent.
fn unwind<S, E>(parents: &HashMap<S, (S, E)>, mut state: S) -> Vec<E>
where
    S: Clone + Eq + std::hash::Hash,
    E: Clone,
{
    let mut events = Vec::new();
    while let Some((previous, event)) = parents.get(&state) {
        events.push(event.clone());
        state = previous.clone();
    }
    events.reverse();
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{OrderEvent, OrderState, OrderTable};

    #[test]
    fn initial_state_needs_no_events() {
        let table = OrderTable;
        assert_eq!(
            PathFinder::new(&table).path_to(&OrderState::Created),
            Some(vec![])
        );
    }

    #[test]
    fn delivered_needs_the_full_happy_path() {
        let table = OrderTable;
        assert_eq!(
            PathFinder::new(&table).path_to(&OrderState::Delivered),
            Some(vec![
                OrderEvent::Pay,
                OrderEvent::StartPreparation,
                OrderEvent::ReadyForDelivery,
                OrderEvent::StartDelivery,
                OrderEvent::Deliver,
            ])
        );
    }

    #[test]
    fn cancelled_takes_the_shortest_route() {
        let table = OrderTable;
        assert_eq!(
            PathFinder::new(&table).path_to(&OrderState::Cancelled),
            Some(vec![OrderEvent::Cancel])
        );
    }

    #[test]
    fn every_order_state_is_reachable() {
        let table = OrderTable;
        let finder = PathFinder::new(&table);
        for state in OrderState::ALL {
            assert!(finder.path_to(&state).is_some(), "{state} unreachable");
        }
    }

    #[test]
    fn reachable_states_are_in_discovery_order() {
        let table = OrderTable;
        assert_eq!(
            PathFinder::new(&table).reachable_states(),
            vec![
                OrderState::Created,
                OrderState::Paid,
                OrderState::Cancelled,
                OrderState::InPreparation,
                OrderState::ReadyForDelivery,
                OrderState::InDelivery,
                OrderState::Delivered,
            ]
        );
    }
}
