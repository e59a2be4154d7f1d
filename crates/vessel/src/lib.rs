//! A contiguous, growable sequence that manages its own raw storage.
//!
//! [`Vector<T>`] owns a single buffer of uninitialised memory and keeps
//! "allocated capacity" separate from "constructed elements". Every
//! mutating operation goes through two primitives: *ensure capacity*, which
//! may relocate the buffer, and *construct/destroy at an index*.
//!
//! # Architecture
//!
//! ```text
//! Vector<T>
//! ├── Storage<T> (raw.rs: the only unsafe code)
//! │   └── RawBuf<T> (allocation, no element knowledge)
//! ├── generation: u64 (validates Cursor)
//! ├── VecConfig (initial capacity, optional ceiling)
//! └── StorageMetrics (allocation/relocation counters)
//! ```
//!
//! # Failure model
//!
//! - Container errors (range, underflow, stale cursor, allocation) are
//!   returned as [`VecError`].
//! - Element failures are panics from `Clone`, `Default`, or construction
//!   closures. They unwind through the vector:
//!   - [`Vector::reserve_cloned`] leaves the vector exactly as it was.
//!   - Insertion leaves the elements as they were; capacity may have grown.
//!   - Construction frees the new buffer and destroys only what was built.
//!
//! # Cursors
//!
//! [`Cursor`] is an offset plus a generation stamp. Relocation, shifting and
//! removal advance the vector's generation, and dereferencing an outdated
//! cursor fails with [`VecError::StaleCursor`] instead of touching memory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod cmp;
pub mod config;
pub mod cursor;
mod edit;
pub mod error;
pub mod metrics;
mod raw;
pub mod vector;

// Public re-exports for the primary API surface.
pub use config::{ConfigError, VecConfig};
pub use cursor::Cursor;
pub use error::VecError;
pub use metrics::StorageMetrics;
pub use vector::Vector;
