// Chunk: docs/chunks/merge_session - Paired-view session: freshness, scroll sync, chunk copying
//!
//! Freshness of the cached diff for one diff view.
//!
//! The controller owns the diff. An edit in either buffer marks it stale and
//! re-arms the debounce timer; when the timer fires the diff is recomputed
//! from whatever the buffers hold at that moment. Anything that needs chunk
//! geometry right now calls [`FreshnessController::ensure_fresh`], which
//! recomputes on the spot and cancels the pending firing.

use std::time::{Duration, Instant};

use lite_merge_buffer::TextBuffer;
use lite_merge_diff::{compute_diff_with, Diff, DiffOptions};
use log::{debug, trace};

use crate::debounce::DebounceTimer;

/// Observable state of a diff view's cached diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The cached diff matches both buffers.
    Fresh,
    /// A buffer changed and no recompute is scheduled.
    Stale,
    /// A buffer changed and the debounce timer is armed.
    RecomputePending,
}

/// Debounced owner of one cached [`Diff`].
#[derive(Debug)]
pub struct FreshnessController {
    options: DiffOptions,
    debounce: Duration,
    slow_debounce: Duration,
    timer: DebounceTimer,
    diff: Option<Diff>,
    stale: bool,
    disposed: bool,
    recomputes: u64,
}

impl FreshnessController {
    /// Creates a controller with no diff yet. It starts out stale; call
    /// `ensure_fresh` to compute the first diff.
    pub fn new(options: DiffOptions, debounce: Duration, slow_debounce: Duration) -> Self {
        Self {
            options,
            debounce,
            slow_debounce,
            timer: DebounceTimer::new(),
            diff: None,
            stale: true,
            disposed: false,
            recomputes: 0,
        }
    }

    pub fn state(&self) -> Freshness {
        if !self.stale {
            Freshness::Fresh
        } else if self.timer.is_armed() {
            Freshness::RecomputePending
        } else {
            Freshness::Stale
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of diffs computed so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// When the pending recompute is due, if one is scheduled.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// The cached diff, only while it is fresh.
    pub fn diff(&self) -> Option<&Diff> {
        if self.stale {
            None
        } else {
            self.diff.as_ref()
        }
    }

    /// Records a change to either buffer.
    ///
    /// `bulk` selects the slower delay, for changes that tend to come in
    /// large batches.
    pub fn on_change(&mut self, now: Instant, bulk: bool) {
        if self.disposed {
            return;
        }
        self.stale = true;
        let delay = if bulk { self.slow_debounce } else { self.debounce };
        self.timer.arm(now, delay);
    }

    /// Recomputes if the debounce deadline has passed. Returns true if a
    /// recompute ran.
    pub fn tick(&mut self, now: Instant, orig: &TextBuffer, edit: &TextBuffer) -> bool {
        if self.disposed || !self.timer.fire_if_due(now) {
            return false;
        }
        self.recompute(orig, edit);
        true
    }

    /// Returns a diff that matches both buffers, recomputing now if needed.
    ///
    /// Returns `None` once the controller has been disposed.
    pub fn ensure_fresh(&mut self, orig: &TextBuffer, edit: &TextBuffer) -> Option<&Diff> {
        if self.disposed {
            trace!("ensure_fresh on a disposed diff view");
            return None;
        }
        if self.stale || self.diff.is_none() {
            self.timer.cancel();
            self.recompute(orig, edit);
        }
        self.diff.as_ref()
    }

    /// Cancels any pending recompute and drops the cached diff. Later changes
    /// and ticks are ignored.
    pub fn dispose(&mut self) {
        self.timer.cancel();
        self.diff = None;
        self.stale = true;
        self.disposed = true;
    }

    fn recompute(&mut self, orig: &TextBuffer, edit: &TextBuffer) {
        let diff = compute_diff_with(&orig.content(), &edit.content(), &self.options);
        self.recomputes += 1;
        debug!(
            "diff recomputed: {} segments (recompute #{})",
            diff.len(),
            self.recomputes
        );
        self.diff = Some(diff);
        self.stale = false;
    }
}
