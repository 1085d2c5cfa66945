//! Core lifecycle types.
//!
//! This module contains the value types every other layer is written against:
//! - State and Event definitions via the `State` and `Event` traits
//! - Immutable history of accepted events
//!
//! Nothing in this module touches storage or logging.

mod history;
mod state;

pub use history::{StateHistory, TransitionRecord};
pub use state::{Event, State};
