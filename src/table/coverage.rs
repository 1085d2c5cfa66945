//! Startup coverage check for transition tables.
//!
//! Every violation is collected with Stillwater's `Validation` so a
//! malformed table reports all of its problems in one pass.

use super::TransitionTable;
use crate::core::{Event, State};
use crate::machine::PathFinder;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A structural defect in a transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("State '{state}' is not final but has no outgoing rule")]
    DeadEnd { state: String },

    #[error("Final state '{state}' has an outgoing rule on '{event}'")]
    TerminalExit { state: String, event: String },

    #[error("State '{state}' is not reachable from '{initial}'")]
    Unreachable { state: String, initial: String },

    #[error("More than one rule handles '{event}' from '{state}'")]
    Ambiguous { state: String, event: String },
}

/// Check a table for total coverage.
///
/// Returns `Validation::Success(())` for a well-formed table, otherwise a
/// failure carrying every violation found.
pub fn check_table<T: TransitionTable>(table: &T) -> Validation<(), NonEmptyVec<TableViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

    let initial = table.initial();
    let reachable: HashSet<T::State> = PathFinder::new(table)
        .reachable_states()
        .into_iter()
        .collect();

    for state in table.states() {
        let outgoing = table.events_from(state);

        if state.is_final() {
            for event in outgoing {
                checks.push(Validation::fail(TableViolation::TerminalExit {
                    state: state.name().to_string(),
                    event: event.name().to_string(),
                }));
            }
        } else if outgoing.is_empty() {
            checks.push(Validation::fail(TableViolation::DeadEnd {
                state: state.name().to_string(),
            }));
        }

        if !reachable.contains(state) {
            checks.push(Validation::fail(TableViolation::Unreachable {
                state: state.name().to_string(),
                initial: initial.name().to_string(),
            }));
        }
    }

    let rules = table.rules();
    for (index, rule) in rules.iter().enumerate() {
        let duplicate = rules[..index]
            .iter()
            .any(|earlier| earlier.matches(&rule.source, &rule.event));
        if duplicate {
            checks.push(Validation::fail(TableViolation::Ambiguous {
                state: rule.source.name().to_string(),
                event: rule.event.name().to_string(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{OrderTable, TransitionRule};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Step {
        Start,
        Middle,
        Stuck,
        Orphan,
        Done,
    }

    impl State for Step {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::Stuck => "Stuck",
                Self::Orphan => "Orphan",
                Self::Done => "Done",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    #[derive(Clone, PartialEq, Eq, Debug)]
    enum Go {
        Next,
        Jump,
    }

    impl Event for Go {
        fn name(&self) -> &str {
            match self {
                Self::Next => "Next",
                Self::Jump => "Jump",
            }
        }
    }

    struct BrokenTable {
        states: Vec<Step>,
        rules: Vec<TransitionRule<Step, Go>>,
    }

    impl TransitionTable for BrokenTable {
        type State = Step;
        type Event = Go;

        fn initial(&self) -> Step {
            Step::Start
        }

        fn states(&self) -> &[Step] {
            &self.states
        }

        fn rules(&self) -> &[TransitionRule<Step, Go>] {
            &self.rules
        }
    }

    #[test]
    fn order_table_is_well_formed() {
        assert!(check_table(&OrderTable).is_success());
    }

    #[test]
    fn coverage_check_accumulates_all_violations() {
        let table = BrokenTable {
            states: vec![
                Step::Start,
                Step::Middle,
                Step::Stuck,
                Step::Orphan,
                Step::Done,
            ],
            rules: vec![
                TransitionRule::new(Step::Start, Go::Next, Step::Middle),
                TransitionRule::new(Step::Start, Go::Next, Step::Stuck),
                TransitionRule::new(Step::Middle, Go::Next, Step::Done),
                TransitionRule::new(Step::Orphan, Go::Next, Step::Done),
                TransitionRule::new(Step::Done, Go::Jump, Step::Start),
            ],
        };

        match check_table(&table) {
            Validation::Failure(errors) => {
                let errors = errors.into_vec();
                assert!(errors.contains(&TableViolation::DeadEnd {
                    state: "Stuck".to_string()
                }));
                assert!(errors.contains(&TableViolation::TerminalExit {
                    state: "Done".to_string(),
                    event: "Jump".to_string(),
                }));
                assert!(errors.contains(&TableViolation::Unreachable {
                    state: "Orphan".to_string(),
                    initial: "Start".to_string(),
                }));
                assert!(errors.contains(&TableViolation::Ambiguous {
                    state: "Start".to_string(),
                    event: "Next".to_string(),
                }));
                // Stuck is shadowed by the first Start/Next rule, so it is
                // unreachable as well.
                assert!(errors.contains(&TableViolation::Unreachable {
                    state: "Stuck".to_string(),
                    initial: "Start".to_string(),
                }));
                assert_eq!(errors.len(), 5);
            }
            Validation::Success(_) => panic!("Expected violations, got success"),
        }
    }
}
