//! Benchmark workloads and utilities for the Vessel container.
//!
//! Provides deterministic, seeded workloads so that runs are comparable:
//!
//! - [`filled_vector`]: a vector of `0..len` built by repeated `push_back`
//! - [`insert_positions`]: positions for a sequence of insertions
//! - [`erase_positions`]: positions for a sequence of erasures

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vessel::{VecError, Vector};

/// Element count used by the "small" benchmark profile.
pub const SMALL: usize = 1_000;

/// Element count used by the "large" benchmark profile.
pub const LARGE: usize = 100_000;

/// Build a vector holding `0..len`, growing organically from the default
/// capacity.
pub fn filled_vector(len: usize) -> Result<Vector<u64>, VecError> {
    let mut v = Vector::new()?;
    for i in 0..len as u64 {
        v.push_back(i)?;
    }
    Ok(v)
}

/// Generate `count` insertion positions for a vector that starts with
/// `start_len` elements and grows by one per insertion.
///
/// Position `k` lies in `[0, start_len + k]`, so each one is valid at the
/// moment it is used.
pub fn insert_positions(start_len: usize, count: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|k| rng.gen_range(0..=start_len + k))
        .collect()
}

/// Generate `count` erase positions for a vector that starts with
/// `start_len` elements and shrinks by one per erasure.
///
/// # Panics
///
/// Panics if `count > start_len`.
pub fn erase_positions(start_len: usize, count: usize, seed: u64) -> Vec<usize> {
    assert!(count <= start_len, "cannot erase {count} of {start_len}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|k| rng.gen_range(0..start_len - k)).collect()
}
