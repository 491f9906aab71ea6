//! Deadline queue shared by every seat's repeat timer.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::host::SeatId;

/// Min-heap of `(deadline, seat)`.
///
/// Entries are never removed early. A seat whose repeat was cancelled or
/// re-armed simply no longer reports that deadline, and the host drops the
/// stale entry when it comes due.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Instant, SeatId)>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, seat: SeatId) {
        self.heap.push(Reverse((deadline, seat)));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _))| *deadline)
    }

    /// How long the event loop may sleep, or `None` to wait indefinitely.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Remove and return every entry due at `now`, earliest first.
    pub fn pop_expired(&mut self, now: Instant) -> Vec<(Instant, SeatId)> {
        let mut due = Vec::new();
        while let Some(Reverse((deadline, _))) = self.heap.peek() {
            if *deadline > now {
                break;
            }
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
