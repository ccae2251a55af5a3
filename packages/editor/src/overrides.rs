//! # Override Pointer Table
//!
//! Sparse map from [`LeafAddress`] to the revision whose content that leaf
//! should show. Only the rich-content track has one.
//!
//! "No entry" and "entry equal to live" mean the same thing, so the second
//! form is never stored: every assignment equal to the live pointer removes
//! the entry instead.

use std::collections::BTreeMap;
use vellum_model::{LeafAddress, RevisionId};

/// Outcome of a normalized assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafAssignment {
    /// The leaf now has an explicit entry
    Pinned(RevisionId),
    /// The leaf has no entry and shows the live module
    FollowsLive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<LeafAddress, RevisionId>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stored rows through the same normalization as live assignments
    pub fn from_entries<I>(entries: I, live: Option<&RevisionId>) -> Self
    where
        I: IntoIterator<Item = (LeafAddress, RevisionId)>,
    {
        let mut table = Self::new();
        for (leaf, revision_id) in entries {
            table.set_leaf_override(leaf, revision_id, live);
        }
        table
    }

    pub fn get(&self, leaf: &LeafAddress) -> Option<&RevisionId> {
        self.entries.get(leaf)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LeafAddress, &RevisionId)> {
        self.entries.iter()
    }

    /// Explicit entry, else the live pointer, else nothing.
    pub fn effective_revision_for<'a>(
        &'a self,
        leaf: &LeafAddress,
        live: Option<&'a RevisionId>,
    ) -> Option<&'a RevisionId> {
        self.entries.get(leaf).or(live)
    }

    pub fn set_leaf_override(
        &mut self,
        leaf: LeafAddress,
        revision_id: RevisionId,
        live: Option<&RevisionId>,
    ) -> LeafAssignment {
        if live == Some(&revision_id) {
            self.entries.remove(&leaf);
            LeafAssignment::FollowsLive
        } else {
            self.entries.insert(leaf, revision_id.clone());
            LeafAssignment::Pinned(revision_id)
        }
    }

    /// Returns whether an entry was removed
    pub fn clear_leaf_override(&mut self, leaf: &LeafAddress) -> bool {
        self.entries.remove(leaf).is_some()
    }

    /// Returns whether anything was removed
    pub fn clear_all_overrides(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Drop entries equal to a new live pointer, returning their addresses
    pub fn normalize_against(&mut self, live: Option<&RevisionId>) -> Vec<LeafAddress> {
        let Some(live) = live else {
            return Vec::new();
        };

        let dropped: Vec<LeafAddress> = self
            .entries
            .iter()
            .filter(|(_, revision_id)| *revision_id == live)
            .map(|(leaf, _)| leaf.clone())
            .collect();
        for leaf in &dropped {
            self.entries.remove(leaf);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaf(position: usize) -> LeafAddress {
        LeafAddress::new("hero", position)
    }

    #[test]
    fn test_assigning_live_removes_entry() {
        let live = RevisionId::from("L");
        let mut table = OverrideTable::new();

        table.set_leaf_override(leaf(0), "X".into(), Some(&live));
        assert_eq!(table.get(&leaf(0)), Some(&RevisionId::from("X")));

        let outcome = table.set_leaf_override(leaf(0), live.clone(), Some(&live));
        assert_eq!(outcome, LeafAssignment::FollowsLive);
        assert!(table.get(&leaf(0)).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_effective_revision_priority() {
        let live = RevisionId::from("L");
        let mut table = OverrideTable::new();
        table.set_leaf_override(leaf(0), "X".into(), Some(&live));

        assert_eq!(
            table.effective_revision_for(&leaf(0), Some(&live)),
            Some(&RevisionId::from("X"))
        );
        assert_eq!(table.effective_revision_for(&leaf(1), Some(&live)), Some(&live));
        assert_eq!(table.effective_revision_for(&leaf(1), None), None);
    }

    #[test]
    fn test_without_live_every_assignment_pins() {
        let mut table = OverrideTable::new();
        let outcome = table.set_leaf_override(leaf(0), "X".into(), None);
        assert_eq!(outcome, LeafAssignment::Pinned("X".into()));
    }

    #[test]
    fn test_normalize_against_new_live() {
        let mut table = OverrideTable::new();
        table.set_leaf_override(leaf(0), "A".into(), None);
        table.set_leaf_override(leaf(1), "B".into(), None);
        table.set_leaf_override(leaf(2), "A".into(), None);

        let dropped = table.normalize_against(Some(&"A".into()));
        assert_eq!(dropped, vec![leaf(0), leaf(2)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&leaf(1)), Some(&RevisionId::from("B")));
    }

    #[test]
    fn test_from_entries_drops_rows_equal_to_live() {
        let live = RevisionId::from("L");
        let table = OverrideTable::from_entries(
            vec![(leaf(0), live.clone()), (leaf(1), "X".into())],
            Some(&live),
        );
        assert_eq!(table.len(), 1);
        assert!(table.get(&leaf(0)).is_none());
    }

    #[test]
    fn test_clear_reports_change() {
        let mut table = OverrideTable::new();
        assert!(!table.clear_leaf_override(&leaf(0)));
        assert!(!table.clear_all_overrides());

        table.set_leaf_override(leaf(0), "X".into(), None);
        assert!(table.clear_all_overrides());
        assert!(table.is_empty());
    }

    proptest! {
        #[test]
        fn prop_repeated_assignment_is_idempotent(
            position in 0usize..4,
            target in prop::sample::select(vec!["L", "A", "B"]),
            live_set in any::<bool>(),
        ) {
            let live = RevisionId::from("L");
            let live = live_set.then_some(&live);

            let mut once = OverrideTable::new();
            once.set_leaf_override(leaf(position), target.into(), live);

            let mut twice = once.clone();
            twice.set_leaf_override(leaf(position), target.into(), live);

            prop_assert_eq!(once, twice);
        }
    }
}
