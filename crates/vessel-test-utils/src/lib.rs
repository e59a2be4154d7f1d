//! Test utilities and instrumented element types for Vessel development.
//!
//! Provides element types that record their own lifetimes ([`Ledger`],
//! [`Tracked`]), inject failures into `Clone` on demand, and refuse any
//! comparison operator other than `!=` and `<` ([`Probe`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Message carried by panics injected through [`Ledger::fail_clone_after`].
pub const INJECTED_CLONE_FAILURE: &str = "injected clone failure";

#[derive(Default)]
struct Counters {
    created: Cell<usize>,
    dropped: Cell<usize>,
    clones: Cell<usize>,
    /// Successful clones left before the next one panics.
    clone_budget: Cell<Option<usize>>,
}

/// Shared record of every [`Tracked`] value created from it.
///
/// Cheap to clone; all clones observe the same counters.
#[derive(Clone, Default)]
pub struct Ledger {
    counters: Rc<Counters>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracked value carrying `value`.
    pub fn track(&self, value: i32) -> Tracked {
        self.counters.created.set(self.counters.created.get() + 1);
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    /// Values created, including clones.
    pub fn created(&self) -> usize {
        self.counters.created.get()
    }

    /// Values dropped.
    pub fn dropped(&self) -> usize {
        self.counters.dropped.get()
    }

    /// Values created and not yet dropped. Negative means a double drop.
    pub fn live(&self) -> isize {
        self.created() as isize - self.dropped() as isize
    }

    /// Successful clones so far.
    pub fn clones(&self) -> usize {
        self.counters.clones.get()
    }

    /// Let `successes` more clones succeed, then panic on the next one.
    pub fn fail_clone_after(&self, successes: usize) {
        self.counters.clone_budget.set(Some(successes));
    }

    /// Stop injecting clone failures.
    pub fn disarm(&self) {
        self.counters.clone_budget.set(None);
    }

    fn before_clone(&self) {
        match self.counters.clone_budget.get() {
            Some(0) => {
                self.counters.clone_budget.set(None);
                panic!("{INJECTED_CLONE_FAILURE}");
            }
            Some(n) => self.counters.clone_budget.set(Some(n - 1)),
            None => {}
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("created", &self.created())
            .field("dropped", &self.dropped())
            .field("clones", &self.clones())
            .finish()
    }
}

/// An `i32` that reports its construction, cloning and destruction to a
/// [`Ledger`].
pub struct Tracked {
    value: i32,
    ledger: Ledger,
}

impl Tracked {
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.ledger.before_clone();
        self.ledger
            .counters
            .clones
            .set(self.ledger.counters.clones.get() + 1);
        self.ledger.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let dropped = &self.ledger.counters.dropped;
        dropped.set(dropped.get() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Tracked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// An `i32` whose only usable comparison operators are `!=` and `<`.
///
/// `==`, `>`, `<=`, `>=` and `partial_cmp` panic, so a passing comparison
/// proves none of them was called.
#[derive(Clone, Copy, Debug)]
pub struct Probe(pub i32);

impl PartialEq for Probe {
    fn eq(&self, _other: &Self) -> bool {
        panic!("Probe: == invoked");
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        self.0 != other.0
    }
}

impl PartialOrd for Probe {
    fn partial_cmp(&self, _other: &Self) -> Option<Ordering> {
        panic!("Probe: partial_cmp invoked");
    }

    fn lt(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    fn le(&self, _other: &Self) -> bool {
        panic!("Probe: <= invoked");
    }

    fn gt(&self, _other: &Self) -> bool {
        panic!("Probe: > invoked");
    }

    fn ge(&self, _other: &Self) -> bool {
        panic!("Probe: >= invoked");
    }
}
