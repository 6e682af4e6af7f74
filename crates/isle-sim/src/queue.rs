//! Time-indexed event queue.
//!
//! A `BTreeMap` keyed by timestamp, each slot holding the events due then in
//! insertion order.  The scheduler drains one timestamp at a time; ordering
//! *within* a timestamp is the batch protocol's job, not the queue's.

use std::collections::BTreeMap;

use isle_core::SimTime;
use isle_event::Event;

/// Pending events, grouped by due time.
#[derive(Default)]
pub struct EventQueue {
    slots: BTreeMap<SimTime, Vec<Event>>,
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `event` under its own timestamp.
    pub fn push(&mut self, event: Event) {
        self.slots.entry(event.time()).or_default().push(event);
        self.total += 1;
    }

    /// Earliest timestamp with pending events, if any.
    pub fn next_time(&self) -> Option<SimTime> {
        self.slots.keys().next().copied()
    }

    /// Remove and return every event due at `time`.
    ///
    /// Returns `None` when the slot is empty, which is how the scheduler's
    /// redrain loop knows a timestamp is exhausted.
    pub fn drain_at(&mut self, time: SimTime) -> Option<Vec<Event>> {
        let batch = self.slots.remove(&time)?;
        self.total -= batch.len();
        Some(batch)
    }

    /// Total pending events across all timestamps.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct occupied timestamps.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
