// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Cancellable one-shot deadline for debounced diff recomputes.
//!
//! Every change re-arms the timer, pushing the deadline out again, so a burst
//! of edits arriving faster than the delay collapses into a single firing.
//! Time is always passed in, never read here, which keeps the state machine
//! deterministic under test.

use std::time::{Duration, Instant};

/// Default delay after an ordinary change, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Default delay after a bulk change (paste, chunk copy), in milliseconds.
pub const DEFAULT_SLOW_DEBOUNCE_MS: u64 = 250;

/// A single pending deadline, or none.
#[derive(Debug, Clone, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates a disarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending deadline and schedules a new one `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Cancels the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, zero once it has passed.
    ///
    /// Hosts use this to size their event-loop wait.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fires the timer if its deadline has been reached.
    ///
    /// Returns true exactly once per arming; the timer is disarmed afterwards.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
