//! Ordered duplicate-free sequence.
//!
//! Backs both the raw-lexeme pool and the lexeme chains inside a path.
//! Insertion keeps the elements sorted and drops exact duplicates;
//! since lexemes arrive in roughly ascending order the insertion point
//! is searched from the tail.

use std::collections::VecDeque;

/// A sorted, duplicate-free sequence with cheap access at both ends.
#[derive(Debug, Clone, Default)]
pub struct SortSet<T: Ord> {
    items: VecDeque<T>,
}

impl<T: Ord> SortSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        SortSet {
            items: VecDeque::new(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert `value` at its sorted position, scanning from the tail.
    /// An element comparing equal to an existing one is not inserted;
    /// returns whether the insertion happened.
    pub fn insert(&mut self, value: T) -> bool {
        let mut idx = self.items.len();
        while idx > 0 {
            match self.items[idx - 1].cmp(&value) {
                std::cmp::Ordering::Greater => idx -= 1,
                std::cmp::Ordering::Equal => return false,
                std::cmp::Ordering::Less => break,
            }
        }
        self.items.insert(idx, value);
        true
    }

    /// The smallest element.
    pub fn peek_first(&self) -> Option<&T> {
        self.items.front()
    }

    /// The largest element.
    pub fn peek_last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Remove and return the smallest element.
    pub fn poll_first(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Remove and return the largest element.
    pub fn poll_last(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Drop all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
