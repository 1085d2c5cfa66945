//! Path search and per-operation machine instances.
//!
//! - **PathFinder**: breadth-first search producing the shortest event
//!   sequence from the initial state to any reachable state
//! - **MachineInstance**: holds one current state, applies one event at a
//!   time, and can replay itself to a persisted state
//!
//! Both borrow the transition table; neither owns or mutates it.

mod instance;
mod path;

pub use instance::{MachineInstance, ReplayError};
pub use path::PathFinder;
