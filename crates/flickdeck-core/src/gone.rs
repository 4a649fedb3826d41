//! The set of cards that have been flicked off the table.

use std::collections::BTreeSet;

/// Indices of flicked cards. Only indices below the deck size are accepted,
/// so the set can never hold more members than the deck has cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoneSet {
    members: BTreeSet<usize>,
    capacity: usize,
}

impl GoneSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            members: BTreeSet::new(),
            capacity,
        }
    }

    /// Returns `true` if the index was newly added.
    pub fn insert(&mut self, index: usize) -> bool {
        index < self.capacity && self.members.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every card of the deck is gone.
    pub fn is_full(&self) -> bool {
        self.members.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }
}
