// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::RowId;

/// Selected row identifiers. Keyed by id, so it survives sorting and paging.
/// Nothing is pruned automatically when records go away.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: BTreeSet<RowId>,
}

impl Selection {
    /// Adds or removes `id`. Returns whether the set changed.
    pub fn set(&mut self, id: RowId, selected: bool) -> bool {
        if selected {
            self.ids.insert(id)
        } else {
            self.ids.remove(&id)
        }
    }

    /// Applies `selected` to every id in `visible`, leaving other ids alone.
    /// Returns how many entries changed.
    pub fn set_all<'a, I>(&mut self, visible: I, selected: bool) -> usize
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        visible
            .into_iter()
            .filter(|id| self.set((*id).clone(), selected))
            .count()
    }

    /// True when `visible` is non-empty and all of it is selected.
    pub fn contains_all<'a, I>(&self, visible: I) -> bool
    where
        I: IntoIterator<Item = &'a RowId>,
    {
        let mut any = false;
        for id in visible {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.ids.len();
        self.ids.clear();
        removed
    }

    pub fn ids(&self) -> &BTreeSet<RowId> {
        &self.ids
    }

    /// Drops ids that are not in `known`. Returns how many were removed.
    pub fn retain_known(&mut self, known: &BTreeSet<RowId>) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| known.contains(id));
        before - self.ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::RowId;
    use std::collections::BTreeSet;

    fn ids(values: &[i64]) -> Vec<RowId> {
        values.iter().copied().map(RowId::Int).collect()
    }

    #[test]
    fn set_is_idempotent() {
        let mut selection = Selection::default();
        assert!(selection.set(RowId::Int(3), true));
        assert!(!selection.set(RowId::Int(3), true));
        assert_eq!(selection.len(), 1);
        assert!(selection.set(RowId::Int(3), false));
        assert!(!selection.set(RowId::Int(3), false));
        assert!(selection.is_empty());
    }

    #[test]
    fn set_all_only_touches_visible_ids() {
        let mut selection = Selection::default();
        let first = ids(&[1, 2, 3]);
        let second = ids(&[4, 5]);

        assert_eq!(selection.set_all(&first, true), 3);
        assert_eq!(selection.set_all(&second, true), 2);
        assert_eq!(selection.len(), 5);

        assert_eq!(selection.set_all(&second, false), 2);
        assert_eq!(selection.ids().iter().cloned().collect::<Vec<_>>(), first);
    }

    #[test]
    fn contains_all_requires_non_empty_page() {
        let mut selection = Selection::default();
        assert!(!selection.contains_all(&Vec::<RowId>::new()));
        selection.set_all(&ids(&[1, 2]), true);
        assert!(selection.contains_all(&ids(&[1, 2])));
        assert!(!selection.contains_all(&ids(&[1, 2, 3])));
    }

    #[test]
    fn retain_known_prunes_missing_ids() {
        let mut selection = Selection::default();
        selection.set_all(&ids(&[1, 2, 3]), true);
        let known: BTreeSet<RowId> = ids(&[2, 3, 4]).into_iter().collect();
        assert_eq!(selection.retain_known(&known), 1);
        assert!(!selection.contains(&RowId::Int(1)));
        assert_eq!(selection.clear(), 2);
    }
}
