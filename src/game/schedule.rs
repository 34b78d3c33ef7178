//! Deferred round transitions.
//!
//! Actions are queued against match time and carry the round generation
//! that scheduled them. A stale action (its round already replaced) is
//! dropped when it comes due instead of acting on the wrong round.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::round::MatchSummary;

/// What to do when a scheduled action comes due.
#[derive(Clone, Debug, PartialEq)]
pub enum DeferredAction {
    /// Replace the finished play round with the results round.
    ShowResults(MatchSummary),
    /// Replace the results round with a fresh play round.
    StartPlayRound,
}

#[derive(Clone, Debug)]
pub struct ScheduledAction {
    /// Match time at which the action fires.
    pub fire_at: f64,
    /// Round generation that scheduled the action.
    pub generation: u64,
    pub action: DeferredAction,
    seq: u64,
}

impl PartialEq for ScheduledAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledAction {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earliest first, then in the order scheduled
        self.fire_at
            .total_cmp(&other.fire_at)
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: BinaryHeap<Reverse<ScheduledAction>>,
    next_seq: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: f64, generation: u64, action: DeferredAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(ScheduledAction {
            fire_at,
            generation,
            action,
            seq,
        }));
    }

    /// Remove and return every action due at or before `now`, earliest
    /// first.
    pub fn take_due(&mut self, now: f64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.pending.peek() {
            if next.fire_at > now {
                break;
            }
            if let Some(Reverse(action)) = self.pending.pop() {
                due.push(action);
            }
        }
        due
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
