//! Page loader overlay shown until content is ready.

use super::scheduler::Timer;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PageLoader {
    min_display: Duration,
    /// Dismiss no matter what once this fires
    fallback: Timer,
    /// Armed by the content-ready signal
    after_ready: Option<Timer>,
    dismissed: bool,
}

impl PageLoader {
    pub fn new(now: Instant, min_display: Duration, fallback: Duration) -> Self {
        Self {
            min_display,
            fallback: Timer::after(now, fallback),
            after_ready: None,
            dismissed: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.dismissed
    }

    /// Content-ready signal. Repeated signals keep the first deadline.
    pub fn mark_ready(&mut self, now: Instant) {
        if self.after_ready.is_none() && !self.dismissed {
            self.after_ready = Some(Timer::after(now, self.min_display));
        }
    }

    /// Advance the loader. Returns true on the tick that dismissed it.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.dismissed {
            return false;
        }
        let ready_due = self.after_ready.as_mut().is_some_and(|t| t.poll(now));
        let fallback_due = self.fallback.poll(now);
        if ready_due || fallback_due {
            self.dismissed = true;
            tracing::debug!(fallback = fallback_due && !ready_due, "page loader dismissed");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(t0: Instant) -> PageLoader {
        PageLoader::new(t0, Duration::from_millis(500), Duration::from_millis(3000))
    }

    #[test]
    fn test_dismissed_after_ready_delay() {
        let t0 = Instant::now();
        let mut l = loader(t0);
        l.mark_ready(t0 + Duration::from_millis(100));
        assert!(!l.tick(t0 + Duration::from_millis(599)));
        assert!(l.tick(t0 + Duration::from_millis(600)));
        assert!(!l.is_visible());
        assert!(!l.tick(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn test_fallback_without_ready_signal() {
        let t0 = Instant::now();
        let mut l = loader(t0);
        assert!(!l.tick(t0 + Duration::from_millis(2999)));
        assert!(l.tick(t0 + Duration::from_millis(3000)));
    }

    #[test]
    fn test_late_ready_does_not_extend_fallback() {
        let t0 = Instant::now();
        let mut l = loader(t0);
        l.mark_ready(t0 + Duration::from_millis(2900));
        assert!(l.tick(t0 + Duration::from_millis(3000)));
    }

    #[test]
    fn test_repeated_ready_keeps_first_deadline() {
        let t0 = Instant::now();
        let mut l = loader(t0);
        l.mark_ready(t0);
        l.mark_ready(t0 + Duration::from_millis(400));
        assert!(l.tick(t0 + Duration::from_millis(500)));
    }
}
