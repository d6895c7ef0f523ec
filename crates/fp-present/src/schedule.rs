//! Tasks due at virtual instants, grouped by the page visit that owns them.
//!
//! Leaving a page cancels its visit, so timers from an earlier page can never
//! fire into a later one.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Duration;

/// Identifies one entry into a page. Every page entry gets a fresh, larger id,
/// so a task carrying an older id is known to be stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisitId(pub u64);

impl VisitId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visit#{}", self.0)
    }
}

/// Work the presenter schedules for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Reveal one more character of whichever text is growing.
    RevealTick,
    /// The fade to black has finished; swap in the destination.
    FadeComplete,
}

/// A task due at an instant, on behalf of a page visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// When the task becomes due, measured from session start.
    pub due: Duration,
    /// Insertion order; breaks ties between tasks due at the same instant.
    pub seq: u64,
    /// The visit the task belongs to.
    pub visit: VisitId,
    /// What to do.
    pub task: Task,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cancellable timers, earliest first.
///
/// Time is virtual: the scheduler never reads a clock, it only answers which
/// tasks are due at an instant the caller supplies.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` for `visit` at `due`.
    pub fn schedule(&mut self, due: Duration, visit: VisitId, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Reverse(Scheduled {
            due,
            seq,
            visit,
            task,
        }));
    }

    /// Cancel every task belonging to `visit`. Returns how many were removed.
    pub fn cancel_visit(&mut self, visit: VisitId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|Reverse(s)| s.visit != visit);
        before - self.pending.len()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Scheduled> {
        match self.pending.peek() {
            Some(Reverse(next)) if next.due <= now => self.pending.pop().map(|Reverse(s)| s),
            _ => None,
        }
    }

    /// When the earliest pending task is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(s)| s.due)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
