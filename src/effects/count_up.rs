//! Count-up animation for hero statistics.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration: Duration,
    started: Option<Instant>,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started: None,
        }
    }

    /// Start counting the first time the stat becomes visible
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.started.is_some() {
            return false;
        }
        self.started = Some(now);
        true
    }

    /// Value shown at `now`. Before the trigger the target is shown so the
    /// stat never reads 0.
    pub fn value(&self, now: Instant) -> u64 {
        let Some(start) = self.started else {
            return self.target;
        };
        if self.duration.is_zero() {
            return self.target;
        }
        let elapsed = now.saturating_duration_since(start);
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        if progress >= 1.0 {
            return self.target;
        }
        let eased = ease_out_quart(progress);
        (self.target as f64 * eased).floor() as u64
    }
}

pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

/// Format with comma thousands separators: 50000 -> "50,000"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
