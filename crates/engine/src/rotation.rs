use std::collections::VecDeque;

use assess_core::model::Competency;

/// Round-robin fairness queue over the active (non-completed) competencies.
///
/// Cycling is an O(1) dequeue plus re-enqueue; a competency that completes
/// is simply not re-enqueued and never reappears. The queue therefore holds
/// no completed competency by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationQueue {
    inner: VecDeque<Competency>,
}

impl RotationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the queue from an ordered competency list.
    pub fn fill<I>(&mut self, competencies: I)
    where
        I: IntoIterator<Item = Competency>,
    {
        self.inner = competencies.into_iter().collect();
    }

    /// Take the competency whose turn it is.
    pub fn take_turn(&mut self) -> Option<Competency> {
        self.inner.pop_front()
    }

    /// Put a still-active competency back at the end of the cycle.
    pub fn requeue(&mut self, competency: Competency) {
        self.inner.push_back(competency);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn contains(&self, competency: &Competency) -> bool {
        self.inner.contains(competency)
    }
}
