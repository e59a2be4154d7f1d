//! The [`Vector`] container: construction, assignment, capacity and access.
//!
//! Element insertion and removal live in `edit.rs`; both work through the
//! two storage primitives: ensure capacity (which may relocate the buffer)
//! and construct/destroy at an index.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};
use std::slice;

use crate::config::VecConfig;
use crate::cursor::Cursor;
use crate::error::VecError;
use crate::metrics::StorageMetrics;
use crate::raw::{Storage, TailWriter};

/// A contiguous growable sequence that owns one raw buffer.
///
/// Slots `[0, len)` hold live elements; slots `[len, capacity)` are
/// uninitialised memory. Every fallible operation returns a [`VecError`];
/// panics from element code (`Clone`, `Default`, construction closures)
/// unwind through the vector without leaking or double-dropping elements.
///
/// ```
/// use vessel::Vector;
///
/// let mut v = Vector::new()?;
/// for i in 1..=5 {
///     v.push_back(i)?;
/// }
/// let pos = v.insert(v.begin() + 2, 99)?;
/// assert_eq!(v.as_slice(), &[1, 2, 99, 3, 4, 5]);
/// v.erase(pos)?;
/// assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
/// # Ok::<(), vessel::VecError>(())
/// ```
pub struct Vector<T> {
    pub(crate) storage: Storage<T>,
    pub(crate) generation: u64,
    pub(crate) config: VecConfig,
    pub(crate) metrics: StorageMetrics,
}

// ── Construction ────────────────────────────────────────────────────

impl<T> Vector<T> {
    /// Create an empty vector with the default configuration.
    ///
    /// Pre-reserves [`VecConfig::DEFAULT_INITIAL_CAPACITY`] slots.
    pub fn new() -> Result<Self, VecError> {
        Self::with_config(VecConfig::default())
    }

    /// Create an empty vector reserving `config.initial_capacity` slots.
    pub fn with_config(config: VecConfig) -> Result<Self, VecError> {
        config.validate()?;
        Self::with_exact_capacity(config.initial_capacity, config)
    }

    /// Build a vector from a fixed-order sequence of values, moving them in.
    ///
    /// Capacity equals `N`.
    pub fn from_values<const N: usize>(values: [T; N]) -> Result<Self, VecError> {
        let mut v = Self::with_exact_capacity(N, VecConfig::default())?;
        for value in values {
            v.storage.push_within_capacity(value);
        }
        Ok(v)
    }

    /// An empty vector that owns no storage. This is also the shape a vector
    /// is left in after [`take`](Vector::take).
    pub(crate) const fn unallocated(config: VecConfig) -> Self {
        Self {
            storage: Storage::unallocated(),
            generation: 0,
            config,
            metrics: StorageMetrics {
                allocations: 0,
                relocations: 0,
                elements_relocated: 0,
                peak_capacity: 0,
            },
        }
    }

    fn with_exact_capacity(capacity: usize, config: VecConfig) -> Result<Self, VecError> {
        let mut v = Self::unallocated(config);
        if capacity > 0 {
            v.check_limit(capacity)?;
            v.storage = Storage::with_capacity(capacity)?;
            v.metrics.record_allocation(capacity);
            tracing::trace!(capacity, "allocated vector storage");
        }
        Ok(v)
    }

    /// Move the contents out, leaving `self` empty and without storage.
    ///
    /// The returned vector keeps the buffer, so cursors obtained before the
    /// call stay valid against it. `self` remains usable and grows again on
    /// the next insertion.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            storage: mem::replace(&mut self.storage, Storage::unallocated()),
            generation: self.generation,
            config: self.config,
            metrics: mem::take(&mut self.metrics),
        };
        self.invalidate();
        taken
    }

    /// Drop the current contents and adopt `other`'s buffer, leaving `other`
    /// empty and without storage. Never fails.
    pub fn move_from(&mut self, other: &mut Self) {
        let generation = self.generation.max(other.generation).wrapping_add(1);
        *self = other.take();
        self.generation = generation;
    }

    /// Replace the contents with a fixed-order sequence of values.
    ///
    /// Existing elements are destroyed first; capacity is kept if it suffices.
    pub fn assign_values<const N: usize>(&mut self, values: [T; N]) -> Result<(), VecError> {
        self.clear();
        self.ensure_capacity(N)?;
        for value in values {
            self.storage.push_within_capacity(value);
        }
        Ok(())
    }

    /// Exchange contents, capacity and configuration with `other`.
    ///
    /// Cursors into either vector become stale.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
        let generation = self.generation.max(other.generation).wrapping_add(1);
        self.generation = generation;
        other.generation = generation;
    }
}

impl<T: Default> Vector<T> {
    /// Create a vector of `len` default-constructed elements. Capacity equals `len`.
    pub fn with_len(len: usize) -> Result<Self, VecError> {
        let mut v = Self::with_exact_capacity(len, VecConfig::default())?;
        v.construct_tail(len, |_| T::default());
        Ok(v)
    }

    /// Resize to `new_len`, default-constructing any new elements.
    ///
    /// Shrinking destroys the trailing elements without reallocating.
    /// Growing reserves exactly `new_len` slots first. If a `default()` call
    /// panics, the elements added so far are destroyed and the length is
    /// restored.
    pub fn resize(&mut self, new_len: usize) -> Result<(), VecError> {
        if self.shrink_to_len(new_len) {
            return Ok(());
        }
        self.ensure_capacity(new_len)?;
        let added = new_len - self.len();
        self.construct_tail(added, |_| T::default());
        Ok(())
    }
}

impl<T: Clone> Vector<T> {
    /// Create a vector of `len` clones of `value`. Capacity equals `len`.
    pub fn from_elem(len: usize, value: &T) -> Result<Self, VecError> {
        let mut v = Self::with_exact_capacity(len, VecConfig::default())?;
        v.construct_tail(len, |_| value.clone());
        Ok(v)
    }

    /// Create a vector holding clones of `values`, in order. Capacity equals
    /// `values.len()`.
    pub fn from_slice(values: &[T]) -> Result<Self, VecError> {
        let mut v = Self::with_exact_capacity(values.len(), VecConfig::default())?;
        v.construct_tail(values.len(), |i| values[i].clone());
        Ok(v)
    }

    /// Deep-copy the live elements into a new buffer sized to fit them.
    ///
    /// The copy carries the same configuration and fresh metrics. If a clone
    /// panics, the partial copy is destroyed and its buffer freed.
    pub fn try_clone(&self) -> Result<Self, VecError> {
        let mut v = Self::with_exact_capacity(self.len(), self.config)?;
        let source = self.as_slice();
        v.construct_tail(source.len(), |i| source[i].clone());
        Ok(v)
    }

    /// Replace the contents with clones of `other`'s elements.
    ///
    /// Current elements are destroyed first; capacity is kept if it suffices
    /// and grows to exactly `other.len()` otherwise.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), VecError> {
        self.assign_slice(other.as_slice())
    }

    /// Replace the contents with clones of `values`.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<(), VecError> {
        self.clear();
        self.ensure_capacity(values.len())?;
        self.construct_tail(values.len(), |i| values[i].clone());
        Ok(())
    }

    /// Replace the contents with `count` clones of `value`.
    pub fn assign_elem(&mut self, count: usize, value: &T) -> Result<(), VecError> {
        self.clear();
        self.ensure_capacity(count)?;
        self.construct_tail(count, |_| value.clone());
        Ok(())
    }

    /// Resize to `new_len`, cloning `value` into any new slots.
    ///
    /// Same contract as [`resize`](Vector::resize).
    pub fn resize_with_value(&mut self, new_len: usize, value: &T) -> Result<(), VecError> {
        if self.shrink_to_len(new_len) {
            return Ok(());
        }
        self.ensure_capacity(new_len)?;
        let added = new_len - self.len();
        self.construct_tail(added, |_| value.clone());
        Ok(())
    }

    /// Ensure capacity for at least `capacity` elements, transferring the
    /// live elements by cloning them.
    ///
    /// If a clone panics, every clone already made is destroyed, the new
    /// buffer is freed, and the vector is left exactly as it was: same
    /// length, capacity, generation, and elements. Never shrinks.
    pub fn reserve_cloned(&mut self, capacity: usize) -> Result<(), VecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.check_limit(capacity)?;
        let old_capacity = self.capacity();
        let len = self.len();
        self.storage.relocate_cloned(capacity)?;
        self.metrics.record_allocation(capacity);
        self.metrics.record_relocation(len);
        self.invalidate();
        tracing::trace!(
            old_capacity,
            new_capacity = capacity,
            len,
            mode = "clone",
            "relocated vector storage"
        );
        Ok(())
    }
}

// ── Capacity ────────────────────────────────────────────────────────

impl<T> Vector<T> {
    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configuration this vector was built with.
    pub fn config(&self) -> &VecConfig {
        &self.config
    }

    /// Allocation and relocation counters.
    pub fn metrics(&self) -> &StorageMetrics {
        &self.metrics
    }

    /// Current generation. Advances on relocation, shifting and removal.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ensure capacity for at least `capacity` elements. Never shrinks.
    ///
    /// Elements are moved into the new buffer; on failure nothing changes.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VecError> {
        self.ensure_capacity(capacity)
    }

    /// No-op if `capacity` fits; otherwise relocate into a buffer of exactly
    /// `capacity` slots.
    pub(crate) fn ensure_capacity(&mut self, capacity: usize) -> Result<(), VecError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.check_limit(capacity)?;
        let old_capacity = self.capacity();
        let len = self.len();
        self.storage.relocate(capacity)?;
        self.metrics.record_allocation(capacity);
        self.metrics.record_relocation(len);
        self.invalidate();
        tracing::trace!(
            old_capacity,
            new_capacity = capacity,
            len,
            mode = "move",
            "relocated vector storage"
        );
        Ok(())
    }

    /// Make room for one more element using the `2 * capacity + 1` policy,
    /// clamped to the configured ceiling.
    pub(crate) fn grow_one(&mut self) -> Result<(), VecError> {
        if self.len() < self.capacity() {
            return Ok(());
        }
        let needed = self.len().checked_add(1).ok_or(VecError::CapacityOverflow {
            requested: usize::MAX,
        })?;
        let target = self.capacity().saturating_mul(2).saturating_add(1);
        self.ensure_capacity(self.clamp_target(target, needed))
    }

    /// Make room for `count` more elements using the
    /// `2 * (len + count) + 1` policy, clamped to the configured ceiling.
    pub(crate) fn grow_for(&mut self, count: usize) -> Result<(), VecError> {
        let needed = self
            .len()
            .checked_add(count)
            .ok_or(VecError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let target = needed.saturating_mul(2).saturating_add(1);
        self.ensure_capacity(self.clamp_target(target, needed))
    }

    fn clamp_target(&self, target: usize, needed: usize) -> usize {
        // An over-limit `needed` is passed through so that ensure_capacity
        // reports it.
        target.min(self.config.limit()).max(needed)
    }

    fn check_limit(&self, capacity: usize) -> Result<(), VecError> {
        match self.config.max_capacity {
            Some(limit) if capacity > limit => Err(VecError::CapacityExceeded {
                requested: capacity,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Destroy elements past `new_len`. Returns `true` if no growth is needed.
    fn shrink_to_len(&mut self, new_len: usize) -> bool {
        if new_len > self.len() {
            return false;
        }
        if new_len < self.len() {
            self.storage.truncate(new_len);
            self.invalidate();
        }
        true
    }

    /// Construct `count` elements at the end from `make(i)`, `i` counting
    /// from zero. Capacity must already be there. A panic in `make` destroys
    /// the elements built so far and restores the length.
    pub(crate) fn construct_tail(&mut self, count: usize, mut make: impl FnMut(usize) -> T) {
        let mut writer = TailWriter::new(&mut self.storage);
        for i in 0..count {
            writer.push(make(i));
        }
        writer.commit();
    }

    pub(crate) fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

// ── Element access ──────────────────────────────────────────────────

impl<T> Vector<T> {
    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<&T, VecError> {
        let len = self.len();
        self.as_slice().get(index).ok_or(VecError::OutOfRange {
            index: index as isize,
            len,
        })
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VecError> {
        let len = self.len();
        self.as_mut_slice().get_mut(index).ok_or(VecError::OutOfRange {
            index: index as isize,
            len,
        })
    }

    /// First element, or [`VecError::Underflow`] when empty.
    pub fn front(&self) -> Result<&T, VecError> {
        self.as_slice()
            .first()
            .ok_or(VecError::Underflow { operation: "front" })
    }

    /// Mutable first element, or [`VecError::Underflow`] when empty.
    pub fn front_mut(&mut self) -> Result<&mut T, VecError> {
        self.as_mut_slice()
            .first_mut()
            .ok_or(VecError::Underflow { operation: "front" })
    }

    /// Last element, or [`VecError::Underflow`] when empty.
    pub fn back(&self) -> Result<&T, VecError> {
        self.as_slice()
            .last()
            .ok_or(VecError::Underflow { operation: "back" })
    }

    /// Mutable last element, or [`VecError::Underflow`] when empty.
    pub fn back_mut(&mut self) -> Result<&mut T, VecError> {
        self.as_mut_slice()
            .last_mut()
            .ok_or(VecError::Underflow { operation: "back" })
    }

    /// Raw pointer to the live region.
    ///
    /// Valid until the next operation that relocates or shifts the buffer.
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Mutable raw pointer to the live region.
    ///
    /// Valid until the next operation that relocates or shifts the buffer.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Iterate over shared references to the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate over mutable references to the live elements.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor {
        Cursor::new(0, self.generation)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor {
        Cursor::new(self.len() as isize, self.generation)
    }

    /// Dereference a cursor.
    ///
    /// Fails with [`VecError::StaleCursor`] if the cursor predates an
    /// invalidating operation, or [`VecError::OutOfRange`] if it does not
    /// point at a live element.
    pub fn get_at(&self, pos: Cursor) -> Result<&T, VecError> {
        let index = self.element_index(pos)?;
        Ok(&self.as_slice()[index])
    }

    /// Dereference a cursor mutably. Same checks as [`get_at`](Vector::get_at).
    pub fn get_at_mut(&mut self, pos: Cursor) -> Result<&mut T, VecError> {
        let index = self.element_index(pos)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// `pos - begin()`, after checking the generation.
    pub(crate) fn checked_offset(&self, pos: Cursor) -> Result<isize, VecError> {
        if pos.generation() != self.generation {
            return Err(VecError::StaleCursor {
                cursor_generation: pos.generation(),
                current_generation: self.generation,
            });
        }
        Ok(pos - self.begin())
    }

    /// Offset of an existing element: `[0, len)`.
    pub(crate) fn element_index(&self, pos: Cursor) -> Result<usize, VecError> {
        let offset = self.checked_offset(pos)?;
        self.index_within(offset, self.len())
    }

    /// Offset of an insertion point: `[0, len]`.
    pub(crate) fn gap_index(&self, pos: Cursor) -> Result<usize, VecError> {
        let offset = self.checked_offset(pos)?;
        self.index_within(offset, self.len() + 1)
    }

    fn index_within(&self, offset: isize, bound: usize) -> Result<usize, VecError> {
        match usize::try_from(offset) {
            Ok(index) if index < bound => Ok(index),
            _ => Err(VecError::OutOfRange {
                index: offset,
                len: self.len(),
            }),
        }
    }
}

// ── Trait impls ─────────────────────────────────────────────────────

/// Empty with no storage, like a moved-from vector. Use [`Vector::new`]
/// for an empty vector with reserved capacity.
impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::unallocated(VecConfig::default())
    }
}

/// # Panics
///
/// Panics if the copy cannot be allocated.
impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(err) => panic!("vessel: clone failed: {err}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            panic!("vessel: clone_from failed: {err}");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Unchecked in the sense of the container: no [`VecError`] is produced, and
/// an out-of-bounds index panics.
impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// # Panics
///
/// Panics if storage cannot be allocated.
impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                panic!("vessel: extend failed: {err}");
            }
        }
    }
}

/// # Panics
///
/// Panics if storage cannot be allocated.
impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::default();
        v.extend(iter);
        v
    }
}

/// # Panics
///
/// Panics if storage cannot be allocated.
impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        match Self::from_values(values) {
            Ok(v) => v,
            Err(err) => panic!("vessel: from array failed: {err}"),
        }
    }
}
