//! Persistence and snapshot error types.

use super::OrderId;
use thiserror::Error;

/// Errors raised by a persistence gateway.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    /// The aggregate disappeared before the write.
    #[error("Order {id} no longer exists")]
    Missing { id: OrderId },

    /// The underlying store refused the operation.
    #[error("Store rejected the operation: {0}")]
    Rejected(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot data failed validation
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(String),
}
