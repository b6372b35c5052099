//! Screen regions recorded during render, resolved on mouse clicks.

use crate::core::HitTarget;
use ratatui::layout::Rect;

#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: HitTarget) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, target));
        }
    }

    /// Record a region given in document rows, translated to the screen and
    /// clipped to the page viewport
    pub fn push_doc(&mut self, rect: Rect, target: HitTarget, scroll_offset: u16, viewport: Rect) {
        let top = rect.y.max(scroll_offset);
        let bottom = rect.bottom().min(scroll_offset.saturating_add(viewport.height));
        if bottom <= top {
            return;
        }
        let screen = Rect::new(
            rect.x,
            viewport.y + (top - scroll_offset),
            rect.width,
            bottom - top,
        );
        self.push(screen.intersection(viewport), target);
    }

    /// Topmost region under `(x, y)`: later pushes win
    pub fn hit(&self, x: u16, y: u16) -> Option<(Rect, HitTarget)> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom())
            .copied()
    }
}

/// Horizontal position of `x` inside `rect`, 0.0 at the first column and 1.0
/// at the last
pub fn relative_x(rect: Rect, x: u16) -> f64 {
    if rect.width <= 1 {
        return 0.0;
    }
    let offset = x.saturating_sub(rect.x).min(rect.width - 1);
    offset as f64 / (rect.width - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topmost_region_wins() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 20, 10), HitTarget::LabPanel);
        map.push(Rect::new(18, 0, 2, 1), HitTarget::LabClose);
        assert_eq!(map.hit(19, 0).map(|(_, t)| t), Some(HitTarget::LabClose));
        assert_eq!(map.hit(5, 5).map(|(_, t)| t), Some(HitTarget::LabPanel));
        assert_eq!(map.hit(25, 5), None);
    }

    #[test]
    fn test_doc_regions_follow_scroll() {
        let viewport = Rect::new(0, 2, 80, 20);
        let mut map = HitMap::default();
        map.push_doc(Rect::new(4, 30, 10, 1), HitTarget::FaqQuestion(0), 25, viewport);
        // Document row 30 minus offset 25, below the 2 header rows
        assert_eq!(map.hit(5, 7).map(|(_, t)| t), Some(HitTarget::FaqQuestion(0)));

        // Scrolled out of view: nothing recorded
        map.clear();
        map.push_doc(Rect::new(4, 30, 10, 1), HitTarget::FaqQuestion(0), 31, viewport);
        map.push_doc(Rect::new(4, 60, 10, 1), HitTarget::FaqQuestion(1), 31, viewport);
        assert_eq!(map.hit(5, 2), None);
        assert_eq!(map.hit(5, 21), None);
    }

    #[test]
    fn test_tall_region_clipped_to_viewport() {
        let viewport = Rect::new(0, 2, 80, 10);
        let mut map = HitMap::default();
        map.push_doc(Rect::new(0, 5, 40, 20), HitTarget::CarouselTrack, 10, viewport);
        assert!(map.hit(1, 2).is_some());
        assert!(map.hit(1, 11).is_some());
        assert!(map.hit(1, 12).is_none());
    }

    #[test]
    fn test_relative_x() {
        let rect = Rect::new(10, 0, 11, 1);
        assert_eq!(relative_x(rect, 10), 0.0);
        assert_eq!(relative_x(rect, 20), 1.0);
        assert_eq!(relative_x(rect, 15), 0.5);
        assert_eq!(relative_x(rect, 40), 1.0);
        assert_eq!(relative_x(Rect::new(0, 0, 1, 1), 0), 0.0);
    }
}
