//! Spend Queue - least-served-first ordering
//!
//! Index-based min-queue over the allocator's department arena.
//!
//! # Problem
//!
//! A department's priority key (`spent`) changes every time it is served.
//! `BinaryHeap` has no decrease/increase-key, and mutating a key while the
//! entry sits inside the heap breaks the heap invariant.
//!
//! # Solution
//!
//! Entries are `(spent, registration_index)` snapshots. A department is
//! popped, mutated outside the heap, then pushed again with its fresh
//! `spent`. At most one entry per department is ever in the heap.
//!
//! Ties on `spent` resolve to the lowest registration index, so runs are
//! reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-queue of department indices keyed by current spend
#[derive(Debug, Clone, Default)]
pub struct SpendQueue {
    heap: BinaryHeap<Reverse<(i64, usize)>>,
}

impl SpendQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Queue holding every index in `spends` keyed by its value
    pub fn from_spends(spends: impl IntoIterator<Item = i64>) -> Self {
        let heap = spends
            .into_iter()
            .enumerate()
            .map(|(index, spent)| Reverse((spent, index)))
            .collect();
        Self { heap }
    }

    /// Insert a department index with its current spend
    pub fn push(&mut self, index: usize, spent: i64) {
        self.heap.push(Reverse((spent, index)));
    }

    /// Remove the least-spent index (lowest index on ties)
    pub fn pop_min(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, index))| index)
    }

    /// Spend key of the entry `pop_min` would return next
    #[cfg(test)]
    fn peek_min_spent(&self) -> Option<i64> {
        self.heap.peek().map(|Reverse((spent, _))| *spent)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
