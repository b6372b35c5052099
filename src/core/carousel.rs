//! Reviews carousel: a windowed, clamped index over a fixed list of cards.
//!
//! Widths are in terminal columns. The carousel never wraps; every transition
//! saturates at `0` or `max_index`.

use serde::Serialize;

/// Bounded-index carousel state
#[derive(Debug, Clone, Serialize)]
pub struct BoundedIndexCarousel {
    item_count: usize,
    card_footprint: u16,
    swipe_threshold: i32,
    visible_count: usize,
    max_index: usize,
    current_index: usize,
}

impl BoundedIndexCarousel {
    /// Create a carousel and take its first width measurement.
    ///
    /// `card_footprint` is card width plus gap. A zero footprint is treated
    /// as one column.
    pub fn new(
        item_count: usize,
        card_footprint: u16,
        swipe_threshold: i32,
        container_width: u16,
    ) -> Self {
        let mut carousel = Self {
            item_count,
            card_footprint: card_footprint.max(1),
            swipe_threshold: swipe_threshold.abs(),
            visible_count: 1,
            max_index: 0,
            current_index: 0,
        };
        carousel.measure(container_width);
        carousel
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn card_footprint(&self) -> u16 {
        self.card_footprint
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Advance one card. Returns true if the index moved.
    pub fn next(&mut self) -> bool {
        if self.current_index < self.max_index {
            self.current_index += 1;
            tracing::debug!(index = self.current_index, "carousel next");
            true
        } else {
            false
        }
    }

    /// Go back one card. Returns true if the index moved.
    pub fn prev(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            tracing::debug!(index = self.current_index, "carousel prev");
            true
        } else {
            false
        }
    }

    /// Re-measure after the container width changed
    pub fn on_resize(&mut self, container_width: u16) {
        self.measure(container_width);
    }

    /// Apply a horizontal drag. `delta_x` is start minus end, so a leftward
    /// drag is positive and advances the carousel.
    pub fn on_swipe(&mut self, delta_x: i32) -> bool {
        if delta_x > self.swipe_threshold {
            self.next()
        } else if delta_x < -self.swipe_threshold {
            self.prev()
        } else {
            false
        }
    }

    /// Horizontal offset of the track, in columns
    pub fn offset(&self) -> u32 {
        self.current_index as u32 * self.card_footprint as u32
    }

    /// Range of card indices currently in the window
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.current_index + self.visible_count).min(self.item_count);
        self.current_index..end
    }

    /// Previous control is de-emphasized at the start
    pub fn prev_dimmed(&self) -> bool {
        self.current_index == 0
    }

    /// Next control is de-emphasized at the end
    pub fn next_dimmed(&self) -> bool {
        self.current_index >= self.max_index
    }

    fn measure(&mut self, container_width: u16) {
        let visible = (container_width / self.card_footprint) as usize;
        self.visible_count = visible.max(1);
        self.max_index = self.item_count.saturating_sub(self.visible_count);
        if self.current_index > self.max_index {
            tracing::debug!(
                from = self.current_index,
                to = self.max_index,
                "carousel index clamped after resize"
            );
        }
        self.current_index = self.current_index.min(self.max_index);
    }
}

/// Tracks a press/release pair on the carousel track and yields the drag
/// distance
#[derive(Debug, Default, Clone)]
pub struct SwipeTracker {
    start_x: Option<u16>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: u16) {
        self.start_x = Some(x);
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Finish the gesture, returning `start - end`
    pub fn end(&mut self, x: u16) -> Option<i32> {
        self.start_x
            .take()
            .map(|start| i32::from(start) - i32::from(x))
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOTPRINT: u16 = 36;

    fn carousel(items: usize, visible: u16) -> BoundedIndexCarousel {
        BoundedIndexCarousel::new(items, FOOTPRINT, 5, FOOTPRINT * visible)
    }

    #[test]
    fn test_next_saturates_at_max_index() {
        let mut c = carousel(5, 2);
        assert_eq!(c.max_index(), 3);

        let mut seen = vec![c.current_index()];
        for _ in 0..4 {
            c.next();
            seen.push(c.current_index());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 3]);
    }

    #[test]
    fn test_prev_saturates_at_zero() {
        let mut c = carousel(5, 2);
        assert!(!c.prev());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_index_stays_in_bounds_for_mixed_sequences() {
        let mut c = carousel(7, 3);
        // Deterministic pseudo-random walk
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 2 == 0 {
                c.next();
            } else {
                c.prev();
            }
            assert!(c.current_index() <= c.max_index());
        }
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut c = carousel(6, 2);
        c.next();
        c.next();
        c.next();
        c.on_resize(FOOTPRINT * 4);
        let once = (c.current_index(), c.max_index(), c.visible_count());
        c.on_resize(FOOTPRINT * 4);
        assert_eq!((c.current_index(), c.max_index(), c.visible_count()), once);
    }

    #[test]
    fn test_resize_clamps_current_index() {
        let mut c = carousel(6, 1);
        for _ in 0..5 {
            c.next();
        }
        assert_eq!(c.current_index(), 5);

        c.on_resize(FOOTPRINT * 4);
        assert_eq!(c.max_index(), 2);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_visible_count_floors_to_one() {
        let c = BoundedIndexCarousel::new(4, FOOTPRINT, 5, 10);
        assert_eq!(c.visible_count(), 1);
        assert_eq!(c.max_index(), 3);

        let c = BoundedIndexCarousel::new(4, FOOTPRINT, 5, 0);
        assert_eq!(c.visible_count(), 1);
    }

    #[test]
    fn test_more_room_than_cards() {
        let mut c = carousel(2, 5);
        assert_eq!(c.max_index(), 0);
        assert!(!c.next());
        assert!(c.prev_dimmed());
        assert!(c.next_dimmed());
    }

    #[test]
    fn test_swipe_past_threshold_advances() {
        let mut c = carousel(5, 2);
        assert_eq!(c.max_index(), 3);
        assert!(c.on_swipe(6));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_swipe_below_threshold_is_noop() {
        let mut c = carousel(5, 2);
        assert!(!c.on_swipe(5));
        assert!(!c.on_swipe(-5));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn test_rightward_swipe_goes_back() {
        let mut c = carousel(5, 2);
        c.next();
        c.next();
        assert!(c.on_swipe(-20));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_measure_before_ready_is_corrected_by_resize() {
        // Measured while the container was still collapsed
        let mut c = BoundedIndexCarousel::new(5, FOOTPRINT, 5, 0);
        assert_eq!(c.max_index(), 4);
        for _ in 0..4 {
            c.next();
        }
        assert_eq!(c.current_index(), 4);

        // Real layout arrives
        c.on_resize(FOOTPRINT * 3);
        assert_eq!(c.visible_count(), 3);
        assert_eq!(c.max_index(), 2);
        assert_eq!(c.current_index(), 2);
        assert!(c.next_dimmed());
    }

    #[test]
    fn test_offset_and_affordances() {
        let mut c = carousel(5, 2);
        assert_eq!(c.offset(), 0);
        assert!(c.prev_dimmed());
        assert!(!c.next_dimmed());

        c.next();
        assert_eq!(c.offset(), FOOTPRINT as u32);
        assert!(!c.prev_dimmed());
        assert_eq!(c.visible_range(), 1..3);
    }

    #[test]
    fn test_swipe_tracker() {
        let mut t = SwipeTracker::default();
        assert_eq!(t.end(10), None);

        t.begin(40);
        assert!(t.is_tracking());
        assert_eq!(t.end(20), Some(20));
        assert!(!t.is_tracking());

        t.begin(5);
        assert_eq!(t.end(30), Some(-25));
    }
}
