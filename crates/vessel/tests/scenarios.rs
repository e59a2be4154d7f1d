//! Integration test: end-to-end usage of the public API.
//!
//! Walks through the typical lifecycle of a vector (fill, positional edits,
//! drain to underflow), the error surface, cursor invalidation, zero-sized
//! elements, and the comparison operators' use of element `!=` and `<`.

use vessel::{cmp, Cursor, VecConfig, VecError, Vector};
use vessel_test_utils::Probe;

fn filled(n: i32) -> Vector<i32> {
    let mut v = Vector::new().unwrap();
    for i in 1..=n {
        v.push_back(i).unwrap();
    }
    v
}

#[test]
fn push_insert_erase_pop_lifecycle() {
    let mut v = filled(5);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

    let pos = v.insert(v.begin() + 2, 99).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 99, 3, 4, 5]);

    v.erase(pos).unwrap();
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

    for expected in [5, 4, 3, 2, 1] {
        assert_eq!(v.pop_back(), Ok(expected));
    }
    assert_eq!(
        v.pop_back(),
        Err(VecError::Underflow {
            operation: "pop_back"
        })
    );
    assert!(v.capacity() >= 5);
}

#[test]
fn at_one_past_end_is_out_of_range() {
    let v = filled(3);
    let err = v.at(v.len()).unwrap_err();
    assert_eq!(err, VecError::OutOfRange { index: 3, len: 3 });
    assert_eq!(err.to_string(), "index 3 out of range for length 3");
}

#[test]
fn allocation_failure_leaves_state_unchanged() {
    let mut v = filled(4);
    let before = (v.len(), v.capacity(), v.generation());
    let err = v.reserve(usize::MAX / 32).unwrap_err();
    assert!(
        matches!(err, VecError::AllocationFailed { .. }),
        "unexpected error: {err}"
    );
    assert_eq!((v.len(), v.capacity(), v.generation()), before);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn capacity_overflow_is_reported() {
    let mut v = Vector::<u64>::new().unwrap();
    let err = v.reserve(usize::MAX).unwrap_err();
    assert!(matches!(err, VecError::CapacityOverflow { .. }));
    assert_eq!(v.capacity(), 1);
}

#[test]
fn ceiling_applies_to_bulk_insertion() {
    let config = VecConfig::new(4).with_max_capacity(6);
    let mut v = Vector::with_config(config).unwrap();
    v.insert_values(v.end(), [1, 2, 3]).unwrap();
    assert_eq!(v.capacity(), 4);
    // 2 * (3 + 3) + 1 = 13, clamped to the ceiling.
    v.insert_n(v.end(), 3, &0).unwrap();
    assert_eq!(v.capacity(), 6);
    let err = v.insert_n(v.begin(), 1, &0).unwrap_err();
    assert_eq!(
        err,
        VecError::CapacityExceeded {
            requested: 7,
            limit: 6
        }
    );
    assert_eq!(v.as_slice(), &[1, 2, 3, 0, 0, 0]);
}

#[test]
fn cursor_arithmetic_and_traversal() {
    let v = filled(4);
    let mut c = v.begin();
    let mut seen = Vec::new();
    while c != v.end() {
        seen.push(*v.get_at(c.post_inc()).unwrap());
    }
    assert_eq!(seen, vec![1, 2, 3, 4]);

    c.dec();
    assert_eq!(v.get_at(c), Ok(&4));
    assert_eq!(v.end() - v.begin(), v.len() as isize);
    assert!(v.begin() < v.end());
    assert_eq!(v.begin() + 3 - 1, v.end() - 2);
}

#[test]
fn invalidating_operations_stale_cursors() {
    type Op = fn(&mut Vector<i32>);
    let ops: [(&str, Op); 6] = [
        ("erase", |v| {
            v.erase(v.begin()).unwrap();
        }),
        ("pop_back", |v| {
            v.pop_back().unwrap();
        }),
        ("clear", |v| v.clear()),
        ("insert front", |v| {
            v.insert(v.begin(), 0).unwrap();
        }),
        ("reserve", |v| v.reserve(1_000).unwrap()),
        ("resize down", |v| v.resize(1).unwrap()),
    ];
    for (name, op) in ops {
        let mut v = filled(4);
        let c: Cursor = v.begin();
        op(&mut v);
        assert!(
            matches!(v.get_at(c), Err(VecError::StaleCursor { .. })),
            "{name} should invalidate cursors"
        );
    }
}

#[test]
fn swap_stales_cursors_into_both_vectors() {
    let mut a = filled(2);
    let mut b = filled(3);
    let (ca, cb) = (a.begin(), b.begin());
    a.swap(&mut b);
    assert!(a.get_at(ca).is_err());
    assert!(b.get_at(cb).is_err());
}

#[test]
fn zero_sized_elements() {
    let mut v = Vector::<()>::new().unwrap();
    for _ in 0..100 {
        v.push_back(()).unwrap();
    }
    assert_eq!(v.len(), 100);
    v.erase_range(v.begin(), v.begin() + 40).unwrap();
    assert_eq!(v.len(), 60);
    assert_eq!(v.pop_back(), Ok(()));
    assert_eq!(v.len(), 59);
}

#[test]
fn comparisons_use_only_ne_and_lt() {
    let a = Vector::from_values([Probe(1), Probe(2), Probe(3)]).unwrap();
    let b = Vector::from_values([Probe(1), Probe(2), Probe(4)]).unwrap();
    let short = Vector::from_values([Probe(1), Probe(2)]).unwrap();

    assert!(cmp::eq(&a, &a));
    assert!(cmp::ne(&a, &b));
    assert!(cmp::lt(&a, &b));
    assert!(cmp::gt(&b, &a));
    assert!(cmp::le(&a, &b) && cmp::le(&a, &a));
    assert!(cmp::ge(&b, &a) && cmp::ge(&a, &a));
    assert!(cmp::lt(&short, &a));

    // Operator forms route through the same functions.
    assert!(a < b);
    assert!(b > a);
    assert!(a <= a);
    assert!(b >= a);
    assert!(a != b);
    assert!(a == a);
}

#[test]
fn errors_render_readably() {
    let mut v = Vector::<i32>::new().unwrap();
    let stale = v.begin();
    v.reserve(8).unwrap();
    let err = v.get_at(stale).unwrap_err();
    assert!(err.to_string().contains("stale"), "got: {err}");
    assert_eq!(
        VecError::Underflow { operation: "back" }.to_string(),
        "back on empty vector"
    );
}
