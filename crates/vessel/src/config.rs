//! Container configuration parameters.

use std::error::Error;
use std::fmt;

/// Configuration for a [`Vector`](crate::Vector).
///
/// Controls the capacity reserved by the default constructor and an optional
/// ceiling on growth. Validated when the vector is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VecConfig {
    /// Slots reserved by [`Vector::with_config`](crate::Vector::with_config).
    ///
    /// Default: 1. Must be nonzero.
    pub initial_capacity: usize,

    /// Upper bound on capacity, in elements.
    ///
    /// Default: `None` (bounded only by the allocator). Organic growth is
    /// clamped to this value; any request beyond it fails with
    /// [`VecError::CapacityExceeded`](crate::VecError::CapacityExceeded).
    pub max_capacity: Option<usize>,
}

impl VecConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1;

    /// Create a config with the given initial capacity and no ceiling.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }

    /// Set the capacity ceiling.
    #[must_use]
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroInitialCapacity);
        }
        if let Some(max) = self.max_capacity {
            if max == 0 {
                return Err(ConfigError::ZeroMaxCapacity);
            }
            if self.initial_capacity > max {
                return Err(ConfigError::InitialExceedsMax {
                    initial: self.initial_capacity,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Largest capacity this config permits.
    pub(crate) fn limit(&self) -> usize {
        self.max_capacity.unwrap_or(usize::MAX)
    }
}

impl Default for VecConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

/// Errors detected by [`VecConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `initial_capacity` is zero.
    ZeroInitialCapacity,
    /// `max_capacity` is `Some(0)`.
    ZeroMaxCapacity,
    /// `initial_capacity` is above `max_capacity`.
    InitialExceedsMax {
        /// The configured initial capacity.
        initial: usize,
        /// The configured ceiling.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialCapacity => write!(f, "initial_capacity must be at least 1"),
            Self::ZeroMaxCapacity => write!(f, "max_capacity must be at least 1"),
            Self::InitialExceedsMax { initial, max } => {
                write!(f, "initial_capacity {initial} exceeds max_capacity {max}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_with_nonzero_capacity() {
        let config = VecConfig::default();
        assert_eq!(config.initial_capacity, 1);
        assert_eq!(config.max_capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_initial_capacity_rejected() {
        let config = VecConfig::new(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroInitialCapacity));
    }

    #[test]
    fn zero_ceiling_rejected() {
        let config = VecConfig::new(1).with_max_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxCapacity));
    }

    #[test]
    fn initial_above_ceiling_rejected() {
        let config = VecConfig::new(8).with_max_capacity(4);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialExceedsMax { initial: 8, max: 4 })
        );
    }

    #[test]
    fn limit_defaults_to_unbounded() {
        assert_eq!(VecConfig::default().limit(), usize::MAX);
        assert_eq!(VecConfig::new(2).with_max_capacity(16).limit(), 16);
    }
}
