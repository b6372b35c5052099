//! Open/closed state for the search overlay, lab-report modal and mobile
//! navigation menu.

use crate::content::SectionId;

/// How an overlay was asked to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    CloseButton,
    /// Click that landed outside the panel
    Outside,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOverlay {
    open: bool,
    last_query: String,
    results: Vec<SectionId>,
}

impl SearchOverlay {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening starts a fresh search
    pub fn open(&mut self) {
        if !self.open {
            self.last_query.clear();
            self.results.clear();
            tracing::debug!("search overlay opened");
        }
        self.open = true;
    }

    /// Every close reason closes the search overlay
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        tracing::debug!(?reason, "search overlay closed");
        true
    }

    pub fn set_results(&mut self, query: &str, results: Vec<SectionId>) {
        self.last_query = query.to_string();
        self.results = results;
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn results(&self) -> &[SectionId] {
        &self.results
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabModal {
    open: bool,
}

impl LabModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        tracing::debug!("lab report opened");
        true
    }

    /// Returns true when the modal actually closed
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        tracing::debug!(?reason, "lab report closed");
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_closes_on_any_reason() {
        for reason in [CloseReason::Escape, CloseReason::CloseButton, CloseReason::Outside] {
            let mut s = SearchOverlay::default();
            s.open();
            assert!(s.close(reason));
            assert!(!s.is_open());
        }
    }

    #[test]
    fn test_closing_closed_overlay_is_noop() {
        let mut s = SearchOverlay::default();
        assert!(!s.close(CloseReason::Escape));
        let mut m = LabModal::default();
        assert!(!m.close(CloseReason::Escape));
    }

    #[test]
    fn test_lab_modal_open_once() {
        let mut m = LabModal::default();
        assert!(m.open());
        assert!(!m.open());
        assert!(m.close(CloseReason::Outside));
        assert!(!m.is_open());
    }

    #[test]
    fn test_mobile_menu_toggle() {
        let mut menu = MobileMenu::default();
        menu.toggle();
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_search_results_kept() {
        let mut s = SearchOverlay::default();
        s.set_results("zinc", vec![SectionId::Ingredients]);
        assert_eq!(s.last_query(), "zinc");
        assert_eq!(s.results(), &[SectionId::Ingredients]);
    }

    #[test]
    fn test_reopening_search_forgets_last_query() {
        let mut s = SearchOverlay::default();
        s.open();
        s.set_results("zzz", Vec::new());
        s.close(CloseReason::Escape);
        assert_eq!(s.last_query(), "zzz");

        s.open();
        assert_eq!(s.last_query(), "");
        assert!(s.results().is_empty());
    }
}
