//! Ordered pending-event queue with a size cap.

use std::collections::VecDeque;

use pagelog_events::Envelope;

/// FIFO of events waiting for the next flush.
#[derive(Debug)]
pub struct PendingQueue {
    events: VecDeque<Envelope>,
    /// Maximum number of events to hold before dropping the oldest.
    max_len: usize,
}

impl PendingQueue {
    pub fn new(max_len: usize) -> Self {
        Self {
            events: VecDeque::new(),
            max_len: max_len.max(1),
        }
    }

    /// Append an event. Returns how many of the oldest events were dropped to make room.
    pub fn push(&mut self, event: Envelope) -> usize {
        self.events.push_back(event);
        self.enforce_cap()
    }

    /// Swap the queue for an empty one and return everything it held.
    pub fn take_batch(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.events).into()
    }

    /// Put a failed batch back ahead of everything queued since it was taken.
    /// Returns how many of the oldest events were dropped to stay under the cap.
    pub fn requeue_front(&mut self, batch: Vec<Envelope>) -> usize {
        for event in batch.into_iter().rev() {
            self.events.push_front(event);
        }
        self.enforce_cap()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Envelope> {
        self.events.iter()
    }

    fn enforce_cap(&mut self) -> usize {
        let excess = self.events.len().saturating_sub(self.max_len);
        self.events.drain(..excess);
        excess
    }
}

impl Default for PendingQueue {
    fn default() -> Self {
        Self::new(pagelog_core::config::defaults::DEFAULT_MAX_QUEUE_SIZE)
    }
}
