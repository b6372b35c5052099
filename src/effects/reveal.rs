//! Staggered and fade-in reveal timing.

use std::time::{Duration, Instant};

/// Reveals a list of items one after another, `step` apart
#[derive(Debug, Clone)]
pub struct StaggeredReveal {
    step: Duration,
    started: Option<Instant>,
}

impl StaggeredReveal {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            started: None,
        }
    }

    /// Already-started reveal, used for content that is visible on load
    pub fn started_at(step: Duration, now: Instant) -> Self {
        Self {
            step,
            started: Some(now),
        }
    }

    /// Hide every item and start revealing again from `now`
    pub fn restart(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Delay before item `index` appears
    pub fn delay_for(&self, index: usize) -> Duration {
        self.step * index as u32
    }

    pub fn is_item_visible(&self, index: usize, now: Instant) -> bool {
        match self.started {
            Some(start) => now >= start + self.delay_for(index),
            None => false,
        }
    }

    /// How many of `total` items are visible at `now`
    pub fn visible_items(&self, total: usize, now: Instant) -> usize {
        let Some(start) = self.started else {
            return 0;
        };
        if now < start {
            return 0;
        }
        if self.step.is_zero() {
            return total;
        }
        let elapsed = now - start;
        let shown = (elapsed.as_millis() / self.step.as_millis().max(1)) as usize + 1;
        shown.min(total)
    }
}

/// One-shot fade-in for a page section: reveals the first time the section
/// intersects the viewport and never hides again
#[derive(Debug, Clone)]
pub struct FadeIn {
    children: StaggeredReveal,
}

impl FadeIn {
    pub fn new(step: Duration) -> Self {
        Self {
            children: StaggeredReveal::new(step),
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.children.is_started()
    }

    /// Report visibility. Returns true when this call revealed the section.
    pub fn observe(&mut self, intersecting: bool, now: Instant) -> bool {
        if intersecting && !self.children.is_started() {
            self.children.restart(now);
            true
        } else {
            false
        }
    }

    pub fn is_child_visible(&self, index: usize, now: Instant) -> bool {
        self.children.is_item_visible(index, now)
    }
}
