//! Exclusive-selection groups shared by the FAQ accordion, ingredient tabs and
//! variant pills.
//!
//! A group owns its members and at most one active index. Whether re-selecting
//! the active member clears it is decided once, at construction, by the
//! group's [`SelectionPolicy`].

use serde::Serialize;

/// What happens when the already-active member is selected again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Re-selecting the active member deactivates it (accordion)
    Toggle,
    /// Re-selecting the active member keeps it active (tabs, pills)
    AlwaysOne,
}

/// Outcome of a `select` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Member became active (any previous member was deactivated)
    Activated(usize),
    /// Active member was deactivated, group is now empty
    Deactivated(usize),
    /// Nothing changed
    Unchanged,
}

/// A set of mutually exclusive members where at most one is active
#[derive(Debug, Clone)]
pub struct ExclusiveSelectionGroup<T> {
    members: Vec<T>,
    active: Option<usize>,
    policy: SelectionPolicy,
}

impl<T> ExclusiveSelectionGroup<T> {
    /// Build a group with nothing active
    pub fn new(members: Vec<T>, policy: SelectionPolicy) -> Self {
        Self {
            members,
            active: None,
            policy,
        }
    }

    /// Build a group with an initially active member.
    ///
    /// Out-of-range initial indices are ignored. A single-active group with no
    /// valid initial member starts on its first member, so tabs and pills
    /// always show a selection.
    pub fn with_initial(members: Vec<T>, policy: SelectionPolicy, initial: Option<usize>) -> Self {
        let mut active = initial.filter(|&idx| idx < members.len());
        if active.is_none() && policy == SelectionPolicy::AlwaysOne && !members.is_empty() {
            active = Some(0);
        }
        Self {
            members,
            active,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&T> {
        self.active.and_then(|idx| self.members.get(idx))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Iterate members together with their active flag
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T, bool)> {
        self.members
            .iter()
            .enumerate()
            .map(move |(idx, member)| (idx, member, self.is_active(idx)))
    }

    /// Select a member, deactivating every other one
    pub fn select(&mut self, index: usize) -> SelectionChange {
        if index >= self.members.len() {
            return SelectionChange::Unchanged;
        }

        match (self.active, self.policy) {
            (Some(current), SelectionPolicy::Toggle) if current == index => {
                self.active = None;
                SelectionChange::Deactivated(index)
            }
            (Some(current), SelectionPolicy::AlwaysOne) if current == index => {
                SelectionChange::Unchanged
            }
            _ => {
                self.active = Some(index);
                SelectionChange::Activated(index)
            }
        }
    }

    /// Select the member after the active one, stopping at the last member
    pub fn select_next(&mut self) -> SelectionChange {
        if self.is_empty() {
            return SelectionChange::Unchanged;
        }
        let target = match self.active {
            Some(idx) if idx + 1 < self.members.len() => idx + 1,
            Some(_) => return SelectionChange::Unchanged,
            None => 0,
        };
        self.select(target)
    }

    /// Select the member before the active one, stopping at the first member
    pub fn select_prev(&mut self) -> SelectionChange {
        if self.is_empty() {
            return SelectionChange::Unchanged;
        }
        let target = match self.active {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) => return SelectionChange::Unchanged,
            None => 0,
        };
        self.select(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(policy: SelectionPolicy) -> ExclusiveSelectionGroup<&'static str> {
        ExclusiveSelectionGroup::new(vec!["a", "b", "c"], policy)
    }

    fn active_count<T>(group: &ExclusiveSelectionGroup<T>) -> usize {
        group.iter().filter(|(_, _, active)| *active).count()
    }

    #[test]
    fn test_single_active_select_activates_target_only() {
        let mut g = group(SelectionPolicy::AlwaysOne);
        for target in [2, 0, 1, 1, 2] {
            g.select(target);
            assert_eq!(active_count(&g), 1);
            assert!(g.is_active(target));
        }
    }

    #[test]
    fn test_single_active_reselect_keeps_member() {
        let mut g = group(SelectionPolicy::AlwaysOne);
        assert_eq!(g.select(1), SelectionChange::Activated(1));
        assert_eq!(g.select(1), SelectionChange::Unchanged);
        assert_eq!(g.active(), Some(&"b"));
    }

    #[test]
    fn test_toggle_twice_returns_to_empty() {
        let mut g = group(SelectionPolicy::Toggle);
        assert_eq!(g.select(1), SelectionChange::Activated(1));
        assert_eq!(g.select(1), SelectionChange::Deactivated(1));
        assert_eq!(g.active_index(), None);
        assert_eq!(active_count(&g), 0);
    }

    #[test]
    fn test_toggle_switching_members_keeps_one_active() {
        let mut g = group(SelectionPolicy::Toggle);
        g.select(0);
        g.select(2);
        assert_eq!(active_count(&g), 1);
        assert!(g.is_active(2));
    }

    #[test]
    fn test_out_of_range_select_is_noop() {
        let mut g = group(SelectionPolicy::Toggle);
        g.select(0);
        assert_eq!(g.select(99), SelectionChange::Unchanged);
        assert!(g.is_active(0));
    }

    #[test]
    fn test_initial_member() {
        let g = ExclusiveSelectionGroup::with_initial(vec![1, 2], SelectionPolicy::AlwaysOne, None);
        assert_eq!(g.active_index(), Some(0));

        let g = ExclusiveSelectionGroup::with_initial(vec![1, 2], SelectionPolicy::AlwaysOne, Some(1));
        assert_eq!(g.active_index(), Some(1));

        let g = ExclusiveSelectionGroup::with_initial(vec![1, 2], SelectionPolicy::Toggle, Some(7));
        assert_eq!(g.active_index(), None);

        let g: ExclusiveSelectionGroup<u8> =
            ExclusiveSelectionGroup::with_initial(Vec::new(), SelectionPolicy::AlwaysOne, None);
        assert_eq!(g.active_index(), None);
    }

    #[test]
    fn test_empty_group_navigation_is_noop() {
        let mut g: ExclusiveSelectionGroup<&str> =
            ExclusiveSelectionGroup::new(Vec::new(), SelectionPolicy::AlwaysOne);
        assert!(g.is_empty());
        assert_eq!(g.select_next(), SelectionChange::Unchanged);
        assert_eq!(g.select_prev(), SelectionChange::Unchanged);
        assert_eq!(g.active_index(), None);
    }

    #[test]
    fn test_select_next_prev_saturate() {
        let mut g = group(SelectionPolicy::AlwaysOne);
        assert_eq!(g.select_prev(), SelectionChange::Activated(0));
        assert_eq!(g.select_prev(), SelectionChange::Unchanged);
        g.select_next();
        g.select_next();
        assert_eq!(g.select_next(), SelectionChange::Unchanged);
        assert_eq!(g.active_index(), Some(2));
    }
}
