//! Error types for lrucache

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Key is not present in the cache
    #[error("Key not in cache")]
    NotFound,

    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be greater than 0)")]
    InvalidCapacity(usize),
}

impl Error {
    /// Returns true if this error is a cache miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::NotFound.to_string(), "Key not in cache");
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be greater than 0)"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::NotFound.is_not_found());
        assert!(!Error::InvalidCapacity(0).is_not_found());
    }
}
