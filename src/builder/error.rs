//! Build errors for the engine builder.

use crate::table::TableViolation;
use thiserror::Error;

/// Errors that can occur when assembling an orchestrator.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Persistence gateway not specified. Call .gateway(gateway) before .build()")]
    MissingGateway,

    #[error("Change notifier not specified. Call .notifier(notifier) before .build()")]
    MissingNotifier,

    #[error("Transition table is malformed ({} violation(s))", .0.len())]
    InvalidTable(Vec<TableViolation>),
}
