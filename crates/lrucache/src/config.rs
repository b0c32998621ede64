//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of entries when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 1024;

/// Construction parameters for an [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,

    /// Label attached to log output
    pub name: Option<String>,
}

impl CacheConfig {
    /// Create a config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            name: None,
        }
    }

    /// Set the label used in log output
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check the config can build a cache
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` - Capacity is zero
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.name, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_capacity() {
        let config = CacheConfig::new(0);
        assert_eq!(config.validate(), Err(Error::InvalidCapacity(0)));
    }

    #[test]
    fn test_config_deserialize() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"capacity": 16, "name": "sessions"}"#).unwrap();
        assert_eq!(config, CacheConfig::new(16).with_name("sessions"));

        // Missing fields fall back to defaults
        let config: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_negative_capacity_rejected() {
        let result = serde_json::from_str::<CacheConfig>(r#"{"capacity": -1}"#);
        assert!(result.is_err());
    }
}
