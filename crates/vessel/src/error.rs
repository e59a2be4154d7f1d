//! Container error types.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors returned by [`Vector`](crate::Vector) operations.
///
/// Element-level failures (a panicking `Clone`, `Default`, or construction
/// closure) are not represented here: they unwind through the container,
/// which keeps its documented guarantees while the panic propagates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VecError {
    /// A positional argument lies outside the span valid for the operation.
    OutOfRange {
        /// The offending offset (negative offsets come from cursor arithmetic).
        index: isize,
        /// Number of live elements at the time of the call.
        len: usize,
    },
    /// An operation that needs at least one element ran on an empty container.
    Underflow {
        /// Name of the operation that underflowed.
        operation: &'static str,
    },
    /// A cursor from a generation that has since been invalidated.
    StaleCursor {
        /// The generation stamped into the cursor.
        cursor_generation: u64,
        /// The container's current generation.
        current_generation: u64,
    },
    /// The requested capacity cannot be described by a memory layout.
    CapacityOverflow {
        /// Requested capacity in elements.
        requested: usize,
    },
    /// The allocator could not provide the requested memory.
    AllocationFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
    },
    /// The requested capacity is above the configured ceiling.
    CapacityExceeded {
        /// Requested capacity in elements.
        requested: usize,
        /// Configured `max_capacity`.
        limit: usize,
    },
    /// The container configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for VecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::Underflow { operation } => {
                write!(f, "{operation} on empty vector")
            }
            Self::StaleCursor {
                cursor_generation,
                current_generation,
            } => {
                write!(
                    f,
                    "stale cursor: generation {cursor_generation}, current {current_generation}"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {bytes} bytes failed")
            }
            Self::CapacityExceeded { requested, limit } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} elements, limit {limit}"
                )
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for VecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for VecError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
