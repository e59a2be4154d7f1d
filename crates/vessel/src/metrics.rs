//! Storage counters for a single container.
//!
//! [`StorageMetrics`] records how often a vector allocated and relocated its
//! buffer, which makes growth cost observable in tests and benchmarks.

/// Allocation and relocation counters collected over a vector's lifetime.
///
/// Counters only ever increase. A moved-from vector starts over from zero;
/// a clone starts with its own single allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageMetrics {
    /// Number of buffers obtained from the allocator.
    pub allocations: u64,
    /// Number of times live elements were transferred into a new buffer.
    pub relocations: u64,
    /// Total elements transferred across all relocations.
    pub elements_relocated: u64,
    /// Largest capacity ever held, in elements.
    pub peak_capacity: usize,
}

impl StorageMetrics {
    pub(crate) fn record_allocation(&mut self, capacity: usize) {
        self.allocations += 1;
        self.peak_capacity = self.peak_capacity.max(capacity);
    }

    pub(crate) fn record_relocation(&mut self, moved: usize) {
        self.relocations += 1;
        self.elements_relocated += moved as u64;
    }
}
