//! Variant pill groups and the price display they drive.
//!
//! The displayed price, details line and header CTA label are never stored:
//! they are recomputed from the active pills on every read.

use super::selection::{ExclusiveSelectionGroup, SelectionChange, SelectionPolicy};
use crate::content::{PillDef, PillGroupDef, PriceMapping};

/// One pill group (flavor, pack size, ...)
#[derive(Debug, Clone)]
pub struct VariantSelector {
    name: String,
    pills: ExclusiveSelectionGroup<PillDef>,
}

impl VariantSelector {
    pub fn discover(group: &PillGroupDef) -> Option<Self> {
        if group.pills.is_empty() {
            tracing::debug!(group = %group.name, "Pill group has no pills, skipping");
            return None;
        }
        let initial = group.pills.iter().position(|p| p.default);
        Some(Self {
            name: group.name.clone(),
            pills: ExclusiveSelectionGroup::with_initial(
                group.pills.clone(),
                SelectionPolicy::AlwaysOne,
                initial,
            ),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pills(&self) -> &ExclusiveSelectionGroup<PillDef> {
        &self.pills
    }

    pub fn active_label(&self) -> Option<&str> {
        self.pills.active().map(|p| p.label.as_str())
    }

    pub fn select(&mut self, index: usize) -> bool {
        let changed = matches!(self.pills.select(index), SelectionChange::Activated(_));
        if changed {
            tracing::debug!(group = %self.name, pill = ?self.active_label(), "pill selected");
        }
        changed
    }

    pub fn select_next(&mut self) -> bool {
        matches!(self.pills.select_next(), SelectionChange::Activated(_))
    }

    pub fn select_prev(&mut self) -> bool {
        matches!(self.pills.select_prev(), SelectionChange::Activated(_))
    }

    /// Price mapping of the active pill, if it carries one
    pub fn display(&self) -> Option<&PriceMapping> {
        self.pills.active()?.price.as_ref()
    }
}

/// All pill groups of the call-to-action block
#[derive(Debug, Clone)]
pub struct VariantPanel {
    groups: Vec<VariantSelector>,
    base_price: PriceMapping,
    /// Keyboard focus among groups
    focused_group: usize,
}

impl VariantPanel {
    pub fn new(groups: &[PillGroupDef], base_price: PriceMapping) -> Self {
        Self {
            groups: groups.iter().filter_map(VariantSelector::discover).collect(),
            base_price,
            focused_group: 0,
        }
    }

    /// Panel over every group that has pills, or None when no group does
    pub fn discover(groups: &[PillGroupDef], base_price: PriceMapping) -> Option<Self> {
        let panel = Self::new(groups, base_price);
        if panel.groups.is_empty() {
            tracing::debug!(declared = groups.len(), "No pill group has pills, skipping pills");
            return None;
        }
        Some(panel)
    }

    pub fn groups(&self) -> &[VariantSelector] {
        &self.groups
    }

    pub fn focused_group(&self) -> usize {
        self.focused_group
    }

    pub fn focus_up(&mut self) {
        self.focused_group = self.focused_group.saturating_sub(1);
    }

    pub fn focus_down(&mut self) {
        if self.focused_group + 1 < self.groups.len() {
            self.focused_group += 1;
        }
    }

    pub fn select(&mut self, group: usize, pill: usize) -> bool {
        match self.groups.get_mut(group) {
            Some(selector) => {
                self.focused_group = group;
                selector.select(pill)
            }
            None => false,
        }
    }

    pub fn select_next_in_focus(&mut self) -> bool {
        self.groups
            .get_mut(self.focused_group)
            .is_some_and(VariantSelector::select_next)
    }

    pub fn select_prev_in_focus(&mut self) -> bool {
        self.groups
            .get_mut(self.focused_group)
            .is_some_and(VariantSelector::select_prev)
    }

    /// First group whose active pill carries a price wins; otherwise the
    /// base price
    pub fn display(&self) -> &PriceMapping {
        self.groups
            .iter()
            .find_map(VariantSelector::display)
            .unwrap_or(&self.base_price)
    }
}
