//! Element insertion and removal.
//!
//! Positional operations take a [`Cursor`] and resolve it to an offset with
//! the generation check first and the range check second. Shifting is done
//! with bitwise moves, which cannot fail; everything that can fail
//! (allocation, cloning the new values, running an emplace closure) happens
//! before any existing element moves. Insertion therefore leaves the vector
//! unchanged on failure, apart from capacity that was already grown.

use crate::cursor::Cursor;
use crate::error::VecError;
use crate::vector::Vector;

impl<T> Vector<T> {
    /// Append `value`. Amortised O(1); grows to `2 * capacity + 1` when full.
    pub fn push_back(&mut self, value: T) -> Result<(), VecError> {
        self.grow_one()?;
        self.storage.push_within_capacity(value);
        Ok(())
    }

    /// Append the value produced by `make` and return a reference to it.
    ///
    /// Capacity is secured before `make` runs.
    pub fn emplace_back(&mut self, make: impl FnOnce() -> T) -> Result<&mut T, VecError> {
        self.grow_one()?;
        self.storage.push_within_capacity(make());
        let last = self.len() - 1;
        Ok(&mut self.as_mut_slice()[last])
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Result<T, VecError> {
        let value = self.storage.pop().ok_or(VecError::Underflow {
            operation: "pop_back",
        })?;
        self.invalidate();
        Ok(value)
    }

    /// Insert `value` before `pos` and return a cursor to it.
    ///
    /// `pos` may be [`end`](Vector::end), which appends without shifting.
    pub fn insert(&mut self, pos: Cursor, value: T) -> Result<Cursor, VecError> {
        let index = self.gap_index(pos)?;
        self.grow_one()?;
        Ok(self.place(index, value))
    }

    /// Insert the value produced by `make` before `pos`.
    ///
    /// Capacity is secured before `make` runs, and the value is moved into
    /// the gap once built.
    pub fn emplace(&mut self, pos: Cursor, make: impl FnOnce() -> T) -> Result<Cursor, VecError> {
        let index = self.gap_index(pos)?;
        self.grow_one()?;
        let value = make();
        Ok(self.place(index, value))
    }

    /// Insert the values of a fixed-order sequence before `pos`, moving them in.
    ///
    /// An empty sequence returns `pos` without checking it.
    pub fn insert_values<const N: usize>(
        &mut self,
        pos: Cursor,
        values: [T; N],
    ) -> Result<Cursor, VecError> {
        if N == 0 {
            return Ok(pos);
        }
        let index = self.gap_index(pos)?;
        self.grow_for(N)?;
        for value in values {
            self.storage.push_within_capacity(value);
        }
        Ok(self.rotate_into_gap(index, N))
    }

    /// Remove the element at `pos`. Returns a cursor to the element that
    /// followed it.
    pub fn erase(&mut self, pos: Cursor) -> Result<Cursor, VecError> {
        let index = self.element_index(pos)?;
        let removed = self.storage.remove_at(index);
        self.invalidate();
        // The vector is consistent before the element's destructor runs.
        drop(removed);
        Ok(Cursor::new(index as isize, self.generation))
    }

    /// Remove `[first, last)`. Returns a cursor to the element that followed
    /// the range. An empty range returns `first` without checking it.
    pub fn erase_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, VecError> {
        if first == last {
            return Ok(first);
        }
        let start = self.checked_offset(first)?;
        let end = self.checked_offset(last)?;
        let len = self.len();
        let bad = |index| VecError::OutOfRange { index, len };
        let start_index = usize::try_from(start).map_err(|_| bad(start))?;
        let end_index = usize::try_from(end).map_err(|_| bad(end))?;
        if start_index > end_index || end_index > len {
            return Err(bad(end));
        }
        self.storage.remove_range(start_index, end_index);
        self.invalidate();
        Ok(Cursor::new(start, self.generation))
    }

    /// Destroy every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.storage.truncate(0);
        self.invalidate();
    }

    /// Move `value` into slot `index`, shifting the tail up by one.
    fn place(&mut self, index: usize, value: T) -> Cursor {
        let shifts = index < self.len();
        self.storage.insert_at(index, value);
        if shifts {
            self.invalidate();
        }
        Cursor::new(index as isize, self.generation)
    }

    /// The last `count` elements were just constructed at the end; rotate
    /// them down to start at `index`.
    fn rotate_into_gap(&mut self, index: usize, count: usize) -> Cursor {
        if index + count < self.len() {
            self.as_mut_slice()[index..].rotate_right(count);
            self.invalidate();
        }
        Cursor::new(index as isize, self.generation)
    }
}

impl<T: Clone> Vector<T> {
    /// Insert `count` clones of `value` before `pos`.
    ///
    /// `count == 0` returns `pos` without checking it.
    pub fn insert_n(&mut self, pos: Cursor, count: usize, value: &T) -> Result<Cursor, VecError> {
        if count == 0 {
            return Ok(pos);
        }
        let index = self.gap_index(pos)?;
        self.grow_for(count)?;
        self.construct_tail(count, |_| value.clone());
        Ok(self.rotate_into_gap(index, count))
    }

    /// Insert clones of `values` before `pos`, in order.
    ///
    /// An empty slice returns `pos` without checking it.
    pub fn insert_slice(&mut self, pos: Cursor, values: &[T]) -> Result<Cursor, VecError> {
        if values.is_empty() {
            return Ok(pos);
        }
        let index = self.gap_index(pos)?;
        self.grow_for(values.len())?;
        self.construct_tail(values.len(), |i| values[i].clone());
        Ok(self.rotate_into_gap(index, values.len()))
    }
}
