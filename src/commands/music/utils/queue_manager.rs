use std::collections::VecDeque;

/// Ordered list of track identifiers waiting to be played.
/// Advancement always takes the head.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackQueue {
    items: VecDeque<String>,
}

impl TrackQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an identifier and return the new length
    pub fn push(&mut self, identifier: impl Into<String>) -> usize {
        self.items.push_back(identifier.into());
        self.items.len()
    }

    /// Remove and return the next identifier to play
    pub fn pop_next(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot of the queue in play order
    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}
