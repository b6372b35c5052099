//! Deadline-based timers driven by the frame tick.
//!
//! Nothing here sleeps or spawns threads. Callers pass the current `Instant`
//! and ask whether work is due, which keeps every effect testable by adding
//! `Duration`s to a fixed start time.

use std::time::{Duration, Instant};

/// One-shot timer that reports due exactly once
#[derive(Debug, Clone)]
pub struct Timer {
    deadline: Instant,
    fired: bool,
}

impl Timer {
    pub fn after(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
            fired: false,
        }
    }

    /// Returns true the first time `now` reaches the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Repeating task with a fixed interval that stops after a set number of runs
#[derive(Debug, Clone)]
pub struct RecurringTask {
    interval: Duration,
    next_due: Instant,
    remaining: usize,
}

impl RecurringTask {
    /// First run is due immediately at `start`
    pub fn limited(start: Instant, interval: Duration, runs: usize) -> Self {
        Self {
            interval,
            next_due: start,
            remaining: runs,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Number of runs that became due since the last poll.
    ///
    /// A long frame catches up on every missed run.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut due = 0;
        while now >= self.next_due && !self.is_finished() {
            due += 1;
            self.remaining -= 1;
            self.next_due += self.interval;
        }
        due
    }
}
