//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runtime switches for the orchestrator.
///
/// Every field has a default, so an empty document is a valid configuration.
///
/// ```rust
/// use order_lifecycle::engine::EngineConfig;
///
/// let config = EngineConfig::from_toml_str("per_order_locking = false").unwrap();
/// assert!(!config.per_order_locking);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Serialize operations on the same order identifier. When disabled,
    /// concurrent operations on one order race and the store's
    /// last-write-wins behavior decides the outcome.
    pub per_order_locking: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            per_order_locking: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_per_order_locking(mut self, enabled: bool) -> Self {
        self.per_order_locking = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.per_order_locking);
    }

    #[test]
    fn locking_can_be_disabled() {
        let config = EngineConfig::from_toml_str("per_order_locking = false\n").unwrap();
        assert_eq!(config, EngineConfig::default().with_per_order_locking(false));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = EngineConfig::from_toml_str("per_order_lock = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(EngineConfig::from_toml_str("per_order_locking = \"yes\"").is_err());
    }
}
