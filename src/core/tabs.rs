//! Ingredient tabs: single-active tab buttons correlated with content panes
//! by key.

use super::selection::{ExclusiveSelectionGroup, SelectionChange, SelectionPolicy};
use crate::content::{Ingredients, TabPaneDef};
use crate::effects::reveal::StaggeredReveal;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TabButton {
    pub key: String,
    pub label: String,
}

/// Tab buttons plus the panes they reveal
#[derive(Debug, Clone)]
pub struct TabGroup {
    title: String,
    buttons: ExclusiveSelectionGroup<TabButton>,
    panes: Vec<TabPaneDef>,
    reveal: StaggeredReveal,
}

impl TabGroup {
    /// Build from page content. Returns `None` when there are no buttons.
    pub fn discover(content: &Ingredients, step: Duration, now: Instant) -> Option<Self> {
        if content.tabs.is_empty() {
            tracing::debug!("Ingredients section has no tab buttons, skipping tabs");
            return None;
        }

        let initial = content.tabs.iter().position(|t| t.default);
        let buttons = content
            .tabs
            .iter()
            .map(|t| TabButton {
                key: t.key.clone(),
                label: t.label.clone(),
            })
            .collect();

        Some(Self {
            title: content.title.clone(),
            buttons: ExclusiveSelectionGroup::with_initial(
                buttons,
                SelectionPolicy::AlwaysOne,
                initial,
            ),
            panes: content.panes.clone(),
            // The default pane is on screen from the start
            reveal: StaggeredReveal::started_at(step, now),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn buttons(&self) -> &ExclusiveSelectionGroup<TabButton> {
        &self.buttons
    }

    pub fn active_index(&self) -> Option<usize> {
        self.buttons.active_index()
    }

    /// Pane whose key matches the active button, looked up on every call
    pub fn active_pane(&self) -> Option<&TabPaneDef> {
        let key = &self.buttons.active()?.key;
        self.panes.iter().find(|pane| &pane.key == key)
    }

    /// Largest pane, for stable section height
    pub fn max_pane_items(&self) -> usize {
        self.panes.iter().map(|p| p.items.len()).max().unwrap_or(0)
    }

    /// Activate a tab. Any click on a tab, including the active one,
    /// restarts the pane's staggered reveal. Returns true when the active
    /// tab changed.
    pub fn select(&mut self, index: usize, now: Instant) -> bool {
        match self.buttons.select(index) {
            SelectionChange::Activated(idx) => self.on_activated(idx, now),
            SelectionChange::Unchanged if self.buttons.is_active(index) => {
                self.reveal.restart(now);
                false
            }
            _ => false,
        }
    }

    pub fn select_next(&mut self, now: Instant) -> bool {
        match self.buttons.select_next() {
            SelectionChange::Activated(idx) => self.on_activated(idx, now),
            _ => false,
        }
    }

    pub fn select_prev(&mut self, now: Instant) -> bool {
        match self.buttons.select_prev() {
            SelectionChange::Activated(idx) => self.on_activated(idx, now),
            _ => false,
        }
    }

    fn on_activated(&mut self, idx: usize, now: Instant) -> bool {
        tracing::debug!(tab = %self.buttons.members()[idx].key, "tab selected");
        self.reveal.restart(now);
        true
    }

    /// Number of items of the active pane that have appeared at `now`
    pub fn visible_items(&self, now: Instant) -> usize {
        let total = self.active_pane().map(|p| p.items.len()).unwrap_or(0);
        self.reveal.visible_items(total, now)
    }
}
