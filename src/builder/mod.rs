//! Builder API for assembling an orchestrator.
//!
//! The builder is the single place where a transition table is checked for
//! total coverage. A table that fails the check never reaches an
//! orchestrator.
//!
//! # Example
//!
//! ```rust
//! use order_lifecycle::builder::EngineBuilder;
//! use order_lifecycle::persistence::MemoryGateway;
//! use order_lifecycle::table::{OrderState, OrderTable};
//! use std::sync::Arc;
//!
//! let gateway = Arc::new(MemoryGateway::new());
//! let engine = EngineBuilder::persisting(OrderTable, Arc::clone(&gateway))
//!     .build()
//!     .unwrap();
//!
//! let id = gateway.create_order().unwrap();
//! assert_eq!(engine.process_payment(&id), Ok(OrderState::Paid));
//! ```

mod error;

pub use error::BuildError;

use crate::engine::{ChangeNotifier, EngineConfig, Orchestrator, PersistingNotifier};
use crate::persistence::PersistenceGateway;
use crate::table::{check_table, TransitionTable};
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::{debug, error};

/// Fluent builder for [`Orchestrator`].
pub struct EngineBuilder<T, G, N> {
    table: T,
    gateway: Option<Arc<G>>,
    notifier: Option<N>,
    config: EngineConfig,
}

impl<T, G, N> EngineBuilder<T, G, N>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
    N: ChangeNotifier<T::State>,
{
    /// Start a builder around `table`.
    pub fn new(table: T) -> Self {
        Self {
            table,
            gateway: None,
            notifier: None,
            config: EngineConfig::default(),
        }
    }

    /// Set the gateway the orchestrator loads from (required).
    pub fn gateway(mut self, gateway: Arc<G>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Set the notifier that commits accepted transitions (required).
    pub fn notifier(mut self, notifier: N) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the table and assemble the orchestrator.
    pub fn build(self) -> Result<Orchestrator<T, G, N>, BuildError> {
        let gateway = self.gateway.ok_or(BuildError::MissingGateway)?;
        let notifier = self.notifier.ok_or(BuildError::MissingNotifier)?;

        if let Validation::Failure(violations) = check_table(&self.table) {
            let violations = violations.into_vec();
            for violation in &violations {
                error!(%violation, "transition table violation");
            }
            return Err(BuildError::InvalidTable(violations));
        }

        debug!(
            states = self.table.states().len(),
            rules = self.table.rules().len(),
            per_order_locking = self.config.per_order_locking,
            "orchestrator built"
        );
        Ok(Orchestrator::from_parts(
            self.table,
            gateway,
            notifier,
            self.config,
        ))
    }
}

impl<T, G> EngineBuilder<T, G, PersistingNotifier<G>>
where
    T: TransitionTable,
    G: PersistenceGateway<T::State>,
{
    /// Builder whose notifier writes straight back to `gateway`.
    pub fn persisting(table: T, gateway: Arc<G>) -> Self {
        let notifier = PersistingNotifier::new(Arc::clone(&gateway));
        Self::new(table).gateway(gateway).notifier(notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, State};
    use crate::engine::AuditingNotifier;
    use crate::persistence::MemoryGateway;
    use crate::table::{OrderState, OrderTable, TableViolation, TransitionRule};
    use serde::{Deserialize, Serialize};

    type Gateway = MemoryGateway<OrderState>;

    #[test]
    fn builder_requires_gateway() {
        let result = EngineBuilder::<_, Gateway, PersistingNotifier<Gateway>>::new(OrderTable)
            .build();

        assert!(matches!(result, Err(BuildError::MissingGateway)));
    }

    #[test]
    fn builder_requires_notifier() {
        let result = EngineBuilder::<_, Gateway, PersistingNotifier<Gateway>>::new(OrderTable)
            .gateway(Arc::new(MemoryGateway::new()))
            .build();

        assert!(matches!(result, Err(BuildError::MissingNotifier)));
    }

    #[test]
    fn custom_notifier_and_config_are_kept() {
        let gateway = Arc::new(MemoryGateway::new());
        let config = EngineConfig::default().with_per_order_locking(false);
        let engine = EngineBuilder::new(OrderTable)
            .gateway(Arc::clone(&gateway))
            .notifier(AuditingNotifier::new(PersistingNotifier::new(Arc::clone(
                &gateway,
            ))))
            .config(config.clone())
            .build()
            .unwrap();

        assert_eq!(engine.config(), &config);
        assert!(engine.notifier().entries().is_empty());
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Door {
        Open,
        Closed,
        Locked,
    }

    impl State for Door {
        fn name(&self) -> &str {
            match self {
                Self::Open => "Open",
                Self::Closed => "Closed",
                Self::Locked => "Locked",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct Close;

    impl Event for Close {
        fn name(&self) -> &str {
            "Close"
        }
    }

    struct DoorTable;

    static DOOR_RULES: [TransitionRule<Door, Close>; 1] =
        [TransitionRule::new(Door::Open, Close, Door::Closed)];

    impl TransitionTable for DoorTable {
        type State = Door;
        type Event = Close;

        fn initial(&self) -> Door {
            Door::Open
        }

        fn states(&self) -> &[Door] {
            &[Door::Open, Door::Closed, Door::Locked]
        }

        fn rules(&self) -> &[TransitionRule<Door, Close>] {
            &DOOR_RULES
        }
    }

    #[test]
    fn malformed_table_is_refused_with_every_violation() {
        let gateway: Arc<MemoryGateway<Door>> = Arc::new(MemoryGateway::new());
        let result = EngineBuilder::persisting(DoorTable, gateway).build();

        let Err(BuildError::InvalidTable(violations)) = result else {
            panic!("expected InvalidTable");
        };
        assert!(violations.contains(&TableViolation::DeadEnd {
            state: "Closed".to_string(),
        }));
        assert!(violations.contains(&TableViolation::Unreachable {
            state: "Locked".to_string(),
            initial: "Open".to_string(),
        }));
        assert!(violations.contains(&TableViolation::DeadEnd {
            state: "Locked".to_string(),
        }));
        assert_eq!(violations.len(), 3);
    }
}
