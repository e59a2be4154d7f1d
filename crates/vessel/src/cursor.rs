//! Generation-checked random-access cursors.
//!
//! A [`Cursor`] is a signed offset into a [`Vector`](crate::Vector) plus the
//! generation of the vector when the cursor was made. Arithmetic and
//! comparison never consult the vector; dereference and positional
//! operations do, and reject a cursor whose generation is out of date with
//! [`VecError::StaleCursor`](crate::VecError::StaleCursor).
//!
//! The generation advances whenever the vector relocates its buffer, shifts
//! elements, or removes elements, so a cursor cannot silently observe a slot
//! that changed underneath it. Cursors from a *different* vector that
//! happens to share the same generation are not detected.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Position within a vector's live region.
///
/// Equality, ordering and hashing look at the offset only.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    offset: isize,
    generation: u64,
}

impl Cursor {
    pub(crate) fn new(offset: isize, generation: u64) -> Self {
        Self { offset, generation }
    }

    /// Signed distance from the beginning of the vector.
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Generation of the vector this cursor was obtained from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance by one and return the advanced cursor.
    pub fn inc(&mut self) -> &mut Self {
        self.offset += 1;
        self
    }

    /// Step back by one and return the moved cursor.
    pub fn dec(&mut self) -> &mut Self {
        self.offset -= 1;
        self
    }

    /// Advance by one, returning the position before the move.
    pub fn post_inc(&mut self) -> Cursor {
        let before = *self;
        self.offset += 1;
        before
    }

    /// Step back by one, returning the position before the move.
    pub fn post_dec(&mut self) -> Cursor {
        let before = *self;
        self.offset -= 1;
        before
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Cursor {}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Hash for Cursor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl Add<isize> for Cursor {
    type Output = Cursor;

    fn add(self, rhs: isize) -> Cursor {
        Cursor::new(self.offset + rhs, self.generation)
    }
}

impl Sub<isize> for Cursor {
    type Output = Cursor;

    fn sub(self, rhs: isize) -> Cursor {
        Cursor::new(self.offset - rhs, self.generation)
    }
}

impl AddAssign<isize> for Cursor {
    fn add_assign(&mut self, rhs: isize) {
        self.offset += rhs;
    }
}

impl SubAssign<isize> for Cursor {
    fn sub_assign(&mut self, rhs: isize) {
        self.offset -= rhs;
    }
}

/// Signed distance between two cursors.
impl Sub for Cursor {
    type Output = isize;

    fn sub(self, rhs: Cursor) -> isize {
        self.offset - rhs.offset
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor(off={}, gen={})", self.offset, self.generation)
    }
}
