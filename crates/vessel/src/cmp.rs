//! Sequence comparison.
//!
//! Free functions over two vectors, built only from `len()` and element
//! access. `eq` and `lt` are the primitives; the other four are derived from
//! them. Elements are only ever compared with `!=` and `<`.
//!
//! For element types without a total order (floats with NaN) the derived
//! operators are negations of `lt`, not independent orderings, so
//! `le(a, b)` can be `true` while neither `lt(a, b)` nor `eq(a, b)` holds.

use std::cmp::Ordering;

use crate::vector::Vector;

/// Same length and no pair of elements differs.
pub fn eq<T: PartialEq>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    !lhs.iter().zip(rhs.iter()).any(|(a, b)| a != b)
}

/// Negation of [`eq`].
pub fn ne<T: PartialEq>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    !eq(lhs, rhs)
}

/// Lexicographic less-than.
///
/// The first differing pair decides; if one sequence runs out first, the
/// shorter one is less.
pub fn lt<T: PartialOrd>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        if a != b {
            return a < b;
        }
    }
    lhs.len() < rhs.len()
}

/// `lt(rhs, lhs)`.
pub fn gt<T: PartialOrd>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    lt(rhs, lhs)
}

/// `!lt(rhs, lhs)`.
pub fn le<T: PartialOrd>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    !lt(rhs, lhs)
}

/// `!lt(lhs, rhs)`.
pub fn ge<T: PartialOrd>(lhs: &Vector<T>, rhs: &Vector<T>) -> bool {
    !lt(lhs, rhs)
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        eq(self, other)
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        ne(self, other)
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if lt(self, other) {
            Some(Ordering::Less)
        } else if lt(other, self) {
            Some(Ordering::Greater)
        } else if eq(self, other) {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        lt(self, other)
    }

    fn le(&self, other: &Self) -> bool {
        le(self, other)
    }

    fn gt(&self, other: &Self) -> bool {
        gt(self, other)
    }

    fn ge(&self, other: &Self) -> bool {
        ge(self, other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if lt(self, other) {
            Ordering::Less
        } else if lt(other, self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
