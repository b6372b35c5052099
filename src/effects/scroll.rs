//! Page scroll position, progress bar and sticky header state.

#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: u16,
    doc_height: u16,
    viewport: u16,
    header_threshold: u16,
    /// Held while a modal is open
    locked: bool,
}

impl ScrollState {
    pub fn new(header_threshold: u16) -> Self {
        Self {
            offset: 0,
            doc_height: 0,
            viewport: 0,
            header_threshold,
            locked: false,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.doc_height.saturating_sub(self.viewport)
    }

    /// Update document and viewport heights, keeping the offset in range
    pub fn set_dimensions(&mut self, doc_height: u16, viewport: u16) {
        self.doc_height = doc_height;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Scroll by a signed number of rows. Ignored while locked.
    pub fn scroll_by(&mut self, rows: i32) -> bool {
        if self.is_locked() {
            return false;
        }
        let target = (self.offset as i32 + rows).clamp(0, self.max_offset() as i32) as u16;
        self.set_offset(target)
    }

    /// Jump to a row (anchor navigation). Ignored while locked.
    pub fn scroll_to(&mut self, row: u16) -> bool {
        if self.is_locked() {
            return false;
        }
        self.set_offset(row.min(self.max_offset()))
    }

    fn set_offset(&mut self, offset: u16) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Percent of the page scrolled, 0.0 when everything fits
    pub fn progress_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 0.0;
        }
        self.offset as f64 / max as f64 * 100.0
    }

    /// Header switches to its compact style past the threshold
    pub fn header_scrolled(&self) -> bool {
        self.offset > self.header_threshold
    }

    /// Whether rows `top..top + height` intersect the viewport
    pub fn is_visible(&self, top: u16, height: u16) -> bool {
        let bottom = top.saturating_add(height);
        let view_bottom = self.offset.saturating_add(self.viewport);
        height > 0 && top < view_bottom && bottom > self.offset
    }
}
