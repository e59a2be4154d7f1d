//! Low-level primitives for raw storage and element lifetimes.
//!
//! This is the only module in the crate that contains `unsafe` code. Every
//! block carries a `// SAFETY:` comment. Higher layers only see the safe
//! API of [`Storage`]: construct at the end, destroy a range, move a range,
//! and relocate into a bigger buffer.
//!
//! [`RawBuf`] owns an allocation and nothing else; it never reads or drops
//! elements. [`Storage`] pairs a `RawBuf` with the count of live elements and
//! upholds the invariant that slots `[0, len)` are constructed and
//! `[len, capacity)` are raw.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use crate::error::VecError;

/// An owned block of uninitialised memory with room for `cap` values of `T`.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: RawBuf is a uniquely owned allocation, like Box<[MaybeUninit<T>]>.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: shared access to a RawBuf never mutates the allocation.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// A buffer that owns no memory.
    pub(crate) const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    /// Obtain raw memory for `capacity` slots. Never constructs a value.
    ///
    /// Zero-sized types and zero capacities do not touch the allocator.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, VecError> {
        if capacity == 0 || Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap: capacity,
                _owns: PhantomData,
            });
        }
        let layout = Layout::array::<T>(capacity).map_err(|_| VecError::CapacityOverflow {
            requested: capacity,
        })?;
        // SAFETY: capacity > 0 and T is not zero-sized, so layout.size() > 0.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(VecError::AllocationFailed {
            bytes: layout.size(),
        })?;
        Ok(Self {
            ptr,
            cap: capacity,
            _owns: PhantomData,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(&self) -> Option<Layout> {
        if self.cap == 0 || Self::IS_ZST {
            return None;
        }
        Layout::array::<T>(self.cap).ok()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if let Some(layout) = self.layout() {
            // SAFETY: ptr came from alloc::alloc with exactly this layout and
            // is freed only here, once.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

/// A raw buffer plus the length of its constructed prefix.
pub(crate) struct Storage<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Storage<T> {
    /// Empty storage that owns no memory (the moved-from shape).
    pub(crate) const fn unallocated() -> Self {
        Self {
            buf: RawBuf::dangling(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, VecError> {
        Ok(Self {
            buf: RawBuf::allocate(capacity)?,
            len: 0,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are constructed; the pointer is non-null and
        // aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Pointer to slot `index`, which may be raw. Callers keep
    /// `index <= capacity` before dereferencing.
    fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity());
        self.buf.as_ptr().wrapping_add(index)
    }

    /// Construct `value` in the first raw slot.
    ///
    /// # Panics
    ///
    /// Panics if there is no raw slot left.
    pub(crate) fn push_within_capacity(&mut self, value: T) {
        assert!(
            self.len < self.capacity(),
            "construct past capacity: len {}, capacity {}",
            self.len,
            self.capacity()
        );
        // SAFETY: len < capacity, so slot len exists and is raw.
        unsafe { ptr::write(self.slot(self.len), value) };
        self.len += 1;
    }

    /// Move the last element out, leaving its slot raw.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot len was live until the decrement above and is now
        // outside the live region, so it is read exactly once.
        Some(unsafe { ptr::read(self.slot(self.len)) })
    }

    /// Destroy elements `[new_len, len)`. No-op if `new_len >= len`.
    ///
    /// `len` is lowered before any destructor runs: a panicking destructor
    /// leaks the rest of the tail rather than exposing dropped slots.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let count = self.len - new_len;
        self.len = new_len;
        // SAFETY: [new_len, new_len + count) were live and are no longer in
        // the live region.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.slot(new_len), count);
            ptr::drop_in_place(tail);
        }
    }

    /// Open a one-slot gap at `index` and move `value` into it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or the buffer is full.
    pub(crate) fn insert_at(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "insert index {index} > len {}", self.len);
        assert!(self.len < self.capacity(), "insert into full storage");
        // SAFETY: [index, len) shifts to [index + 1, len + 1), which fits
        // because len < capacity. ptr::copy handles the overlap.
        unsafe {
            let gap = self.slot(index);
            ptr::copy(gap, self.slot(index + 1), self.len - index);
            ptr::write(gap, value);
        }
        self.len += 1;
    }

    /// Move the element at `index` out and close the gap.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove_at(&mut self, index: usize) -> T {
        assert!(index < self.len, "remove index {index} >= len {}", self.len);
        // SAFETY: slot index is live; it is read once, then overwritten by the
        // shifted tail [index + 1, len).
        let value = unsafe {
            let hole = self.slot(index);
            let value = ptr::read(hole);
            ptr::copy(self.slot(index + 1), hole, self.len - index - 1);
            value
        };
        self.len -= 1;
        value
    }

    /// Destroy `[start, end)` and shift the tail down to close the gap.
    ///
    /// # Panics
    ///
    /// Panics unless `start <= end <= len`.
    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        assert!(
            start <= end && end <= self.len,
            "remove range {start}..{end} out of bounds for len {}",
            self.len
        );
        let old_len = self.len;
        let count = end - start;
        // Hide the range and the tail while destructors run.
        self.len = start;
        // SAFETY: [start, end) are live and hidden from the live region.
        unsafe {
            let range = ptr::slice_from_raw_parts_mut(self.slot(start), count);
            ptr::drop_in_place(range);
        }
        // SAFETY: [end, old_len) are live; they move to [start, old_len - count).
        unsafe { ptr::copy(self.slot(end), self.slot(start), old_len - end) };
        self.len = old_len - count;
    }

    /// Replace the buffer with one of `new_capacity` slots, moving live elements.
    ///
    /// Moves are bitwise, so once the new buffer exists the transfer cannot
    /// fail. If allocation fails nothing is touched.
    pub(crate) fn relocate(&mut self, new_capacity: usize) -> Result<(), VecError> {
        debug_assert!(new_capacity >= self.len);
        let fresh = RawBuf::allocate(new_capacity)?;
        // SAFETY: both buffers hold at least len slots and are distinct
        // allocations. The old slots are treated as raw afterwards and the
        // old buffer is only deallocated, never dropped element-wise.
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_ptr(), self.len) };
        self.buf = fresh;
        Ok(())
    }

    /// Replace the buffer with one of `new_capacity` slots, cloning live
    /// elements into it.
    ///
    /// If a clone panics, the clones already built are destroyed, the new
    /// buffer is freed, and `self` is untouched. On success the originals
    /// are destroyed and the old buffer freed.
    pub(crate) fn relocate_cloned(&mut self, new_capacity: usize) -> Result<(), VecError>
    where
        T: Clone,
    {
        debug_assert!(new_capacity >= self.len);
        let mut fresh = Storage::with_capacity(new_capacity)?;
        for item in self.as_slice() {
            fresh.push_within_capacity(item.clone());
        }
        // `fresh` now holds the originals and drops them with the old buffer.
        mem::swap(self, &mut fresh);
        Ok(())
    }
}

impl<T> Drop for Storage<T> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

/// Builds elements into the raw tail of a [`Storage`].
///
/// Dropping the writer without calling [`commit`](TailWriter::commit)
/// destroys everything it built and restores the original length, so a
/// panic midway through a bulk construction leaves the live region as it
/// was before the writer started.
pub(crate) struct TailWriter<'a, T> {
    storage: &'a mut Storage<T>,
    start: usize,
}

impl<'a, T> TailWriter<'a, T> {
    pub(crate) fn new(storage: &'a mut Storage<T>) -> Self {
        let start = storage.len();
        Self { storage, start }
    }

    /// Construct one more element.
    ///
    /// # Panics
    ///
    /// Panics if the storage is full.
    pub(crate) fn push(&mut self, value: T) {
        self.storage.push_within_capacity(value);
    }

    /// Keep what was built.
    pub(crate) fn commit(self) {
        mem::forget(self);
    }
}

impl<T> Drop for TailWriter<'_, T> {
    fn drop(&mut self) {
        self.storage.truncate(self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Debug)]
    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn filled(values: &[i32], capacity: usize) -> Storage<i32> {
        let mut s = Storage::with_capacity(capacity).unwrap();
        for &v in values {
            s.push_within_capacity(v);
        }
        s
    }

    #[test]
    fn zero_capacity_does_not_allocate() {
        let buf = RawBuf::<u64>::allocate(0).unwrap();
        assert_eq!(buf.capacity(), 0);
        assert!(buf.layout().is_none());
    }

    #[test]
    fn zst_capacity_is_logical() {
        let buf = RawBuf::<()>::allocate(1_000).unwrap();
        assert_eq!(buf.capacity(), 1_000);
        assert!(buf.layout().is_none());
    }

    #[test]
    fn layout_overflow_is_reported() {
        let err = RawBuf::<u64>::allocate(usize::MAX).err();
        assert_eq!(
            err,
            Some(VecError::CapacityOverflow {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn push_and_pop_respect_order() {
        let mut s = filled(&[1, 2, 3], 4);
        assert_eq!(s.as_slice(), &[1, 2, 3]);
        assert_eq!(s.pop(), Some(3));
        assert_eq!(s.len(), 2);
        assert_eq!(s.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "construct past capacity")]
    fn push_past_capacity_panics() {
        let mut s = filled(&[1], 1);
        s.push_within_capacity(2);
    }

    #[test]
    fn insert_and_remove_shift_tail() {
        let mut s = filled(&[1, 2, 4], 4);
        s.insert_at(2, 3);
        assert_eq!(s.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(s.remove_at(0), 1);
        assert_eq!(s.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn remove_range_destroys_exactly_the_range() {
        let drops = Rc::new(Cell::new(0));
        let mut s = Storage::with_capacity(5).unwrap();
        for _ in 0..5 {
            s.push_within_capacity(Counted(drops.clone()));
        }
        s.remove_range(1, 3);
        assert_eq!(s.len(), 3);
        assert_eq!(drops.get(), 2);
        drop(s);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn relocate_moves_without_dropping() {
        let drops = Rc::new(Cell::new(0));
        let mut s = Storage::with_capacity(2).unwrap();
        s.push_within_capacity(Counted(drops.clone()));
        s.push_within_capacity(Counted(drops.clone()));
        s.relocate(8).unwrap();
        assert_eq!(s.capacity(), 8);
        assert_eq!(s.len(), 2);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn relocate_cloned_destroys_originals() {
        #[derive(Debug)]
        struct Cloneable(Rc<Cell<usize>>);
        impl Clone for Cloneable {
            fn clone(&self) -> Self {
                Cloneable(self.0.clone())
            }
        }
        impl Drop for Cloneable {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut s = Storage::with_capacity(3).unwrap();
        for _ in 0..3 {
            s.push_within_capacity(Cloneable(drops.clone()));
        }
        s.relocate_cloned(7).unwrap();
        assert_eq!(drops.get(), 3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.capacity(), 7);
    }

    #[test]
    fn tail_writer_rolls_back_on_drop() {
        let mut s = filled(&[1, 2], 6);
        {
            let mut w = TailWriter::new(&mut s);
            w.push(3);
            w.push(4);
        }
        assert_eq!(s.as_slice(), &[1, 2]);

        let mut w = TailWriter::new(&mut s);
        w.push(3);
        w.commit();
        assert_eq!(s.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn tail_writer_rolls_back_on_panic() {
        let mut s = filled(&[10], 4);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut w = TailWriter::new(&mut s);
            w.push(11);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(s.as_slice(), &[10]);
    }
}
