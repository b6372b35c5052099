//! Vertical layout of the page document.
//!
//! Section heights depend on content, width and a little widget state (the
//! open FAQ answer, the tallest ingredient pane). Both scrolling and the
//! renderer read the same numbers from here.

use super::page::PageControllers;
use crate::content::{PageContent, SectionId};

/// Rows pinned to the top of the screen: header and progress bar
pub const HEADER_ROWS: u16 = 2;
/// Heading line plus the blank line under it
pub const SECTION_HEADING_ROWS: u16 = 2;
pub const STAT_BOX_HEIGHT: u16 = 3;
pub const REVIEW_CARD_HEIGHT: u16 = 8;
pub const DOSAGE_RESULT_HEIGHT: u16 = 3;
/// Narrowest content width the layout will wrap to
const MIN_CONTENT_WIDTH: u16 = 10;

/// Greedy word wrap by character count
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSlot {
    pub id: SectionId,
    /// First document row
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub slots: Vec<SectionSlot>,
    pub doc_height: u16,
    pub content_width: u16,
}

impl PageLayout {
    /// Lay out every section present in `content` for a terminal `width`
    pub fn compute(
        content: &PageContent,
        controllers: &PageControllers,
        width: u16,
        padding: u16,
    ) -> Self {
        let content_width = content_width(width, padding);
        let mut slots = Vec::new();
        let mut top: u16 = 0;

        for id in SectionId::ALL {
            if !content.has_section(id) {
                continue;
            }
            let height = section_height(id, content, controllers, content_width);
            slots.push(SectionSlot { id, top, height });
            top = top.saturating_add(height);
        }

        Self {
            slots,
            doc_height: top,
            content_width,
        }
    }

    pub fn slot(&self, id: SectionId) -> Option<&SectionSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Document row of the primary call-to-action button
    pub fn cta_button_row(&self, content: &PageContent, controllers: &PageControllers) -> Option<u16> {
        let slot = self.slot(SectionId::Cta)?;
        let groups = controllers.variants.as_ref().map_or(0, |v| v.groups().len()) as u16;
        let headline = headline_rows(content, self.content_width);
        // headline, blank, pill rows, blank, price, details, blank
        Some(slot.top + headline + 1 + groups + 1 + 2 + 1)
    }
}

/// Usable width between the side paddings
pub fn content_width(width: u16, padding: u16) -> u16 {
    width
        .saturating_sub(padding.saturating_mul(2))
        .max(MIN_CONTENT_WIDTH)
}

fn headline_rows(content: &PageContent, width: u16) -> u16 {
    content
        .cta
        .as_ref()
        .map_or(1, |cta| wrap_text(&cta.headline, width as usize).len().max(1) as u16)
}

fn section_height(
    id: SectionId,
    content: &PageContent,
    controllers: &PageControllers,
    width: u16,
) -> u16 {
    let w = width as usize;
    let rows = match id {
        SectionId::Hero => {
            let Some(hero) = &content.hero else { return 0 };
            let title = wrap_text(&hero.title, w).len().max(1);
            let tagline = wrap_text(&hero.tagline, w).len();
            let stats = if hero.stats.is_empty() {
                0
            } else {
                STAT_BOX_HEIGHT as usize + 1
            };
            1 + title + 1 + tagline + 1 + stats
        }
        SectionId::Benefits => {
            let body: usize = content
                .benefits
                .iter()
                .map(|b| 1 + wrap_text(&b.text, w.saturating_sub(4)).len() + 1)
                .sum();
            SECTION_HEADING_ROWS as usize + body
        }
        SectionId::Ingredients => {
            let body = match &controllers.tabs {
                // Tallest pane, so switching tabs never moves the page
                Some(tabs) => 2 + tabs.max_pane_items(),
                None => 1,
            };
            SECTION_HEADING_ROWS as usize + body + 1
        }
        SectionId::Dosage => {
            let body = match &controllers.dosage {
                // slider, age label, blank, result box
                Some(_) => 3 + DOSAGE_RESULT_HEIGHT as usize,
                None => 1,
            };
            SECTION_HEADING_ROWS as usize + body + 1
        }
        SectionId::Reviews => {
            let body = match &controllers.carousel {
                // cards, control row
                Some(_) => REVIEW_CARD_HEIGHT as usize + 1,
                None => 1,
            };
            SECTION_HEADING_ROWS as usize + body + 1
        }
        SectionId::Faq => {
            let open = controllers.faq.as_ref().and_then(|f| f.open_index());
            let body: usize = content
                .faq
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let answer = if open == Some(i) {
                        wrap_text(&item.answer, w.saturating_sub(4)).len()
                    } else {
                        0
                    };
                    1 + answer
                })
                .sum();
            SECTION_HEADING_ROWS as usize + body + 1
        }
        SectionId::Cta => {
            let Some(cta) = &content.cta else { return 0 };
            let groups = controllers.variants.as_ref().map_or(0, |v| v.groups().len());
            let lab = usize::from(cta.lab_link.is_some());
            headline_rows(content, width) as usize + 1 + groups + 1 + 2 + 1 + 1 + lab + 1
        }
    };
    rows.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Instant;

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("averyveryverylongword", 5), vec!["averyveryverylongword"]);
        assert_eq!(wrap_text("a  b", 10), vec!["a b"]);
    }

    #[test]
    fn test_sections_are_contiguous_in_document_order() {
        let content = PageContent::embedded().unwrap();
        let controllers =
            PageControllers::discover(&content, &Config::default(), 80, Instant::now());
        let layout = PageLayout::compute(&content, &controllers, 84, 2);

        assert_eq!(layout.slots.len(), SectionId::ALL.len());
        assert_eq!(layout.slots[0].top, 0);
        for pair in layout.slots.windows(2) {
            assert_eq!(pair[0].top + pair[0].height, pair[1].top);
        }
        let last = layout.slots.last().unwrap();
        assert_eq!(layout.doc_height, last.top + last.height);
        assert_eq!(layout.slots[0].id, SectionId::Hero);
    }

    #[test]
    fn test_open_faq_answer_grows_section() {
        let content = PageContent::embedded().unwrap();
        let mut controllers =
            PageControllers::discover(&content, &Config::default(), 80, Instant::now());
        let before = PageLayout::compute(&content, &controllers, 84, 2);
        controllers.faq.as_mut().unwrap().toggle(1);
        let after = PageLayout::compute(&content, &controllers, 84, 2);

        let grow = after.slot(SectionId::Faq).unwrap().height
            - before.slot(SectionId::Faq).unwrap().height;
        assert!(grow >= 1);
        assert_eq!(after.doc_height - before.doc_height, grow);
    }

    #[test]
    fn test_cta_button_row_inside_cta_section() {
        let content = PageContent::embedded().unwrap();
        let controllers =
            PageControllers::discover(&content, &Config::default(), 80, Instant::now());
        let layout = PageLayout::compute(&content, &controllers, 84, 2);
        let slot = *layout.slot(SectionId::Cta).unwrap();
        let row = layout.cta_button_row(&content, &controllers).unwrap();
        assert!(row > slot.top && row < slot.top + slot.height);
    }

    #[test]
    fn test_content_width_has_floor() {
        assert_eq!(content_width(100, 2), 96);
        assert_eq!(content_width(8, 2), 10);
    }
}
