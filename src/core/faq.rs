//! FAQ accordion. At most one answer is open; clicking the open question
//! closes it.

use super::selection::{ExclusiveSelectionGroup, SelectionChange, SelectionPolicy};
use crate::content::FaqItem;

#[derive(Debug, Clone)]
pub struct FaqAccordion {
    items: ExclusiveSelectionGroup<FaqItem>,
    /// Keyboard cursor, independent of which answer is open
    cursor: usize,
}

impl FaqAccordion {
    pub fn discover(items: &[FaqItem]) -> Option<Self> {
        if items.is_empty() {
            tracing::debug!("No FAQ items, skipping accordion");
            return None;
        }
        Some(Self {
            items: ExclusiveSelectionGroup::new(items.to_vec(), SelectionPolicy::Toggle),
            cursor: 0,
        })
    }

    pub fn items(&self) -> &ExclusiveSelectionGroup<FaqItem> {
        &self.items
    }

    pub fn open_index(&self) -> Option<usize> {
        self.items.active_index()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Open a question, closing any other; toggles it if already open
    pub fn toggle(&mut self, index: usize) -> SelectionChange {
        let change = self.items.select(index);
        if change != SelectionChange::Unchanged {
            self.cursor = index;
            tracing::debug!(?change, "faq toggled");
        }
        change
    }

    pub fn toggle_at_cursor(&mut self) -> SelectionChange {
        self.toggle(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }
}
