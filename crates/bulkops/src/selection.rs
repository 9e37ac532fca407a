use std::collections::BTreeSet;

use stockops_core::ItemId;

/// The user-chosen subset of items targeted by a bulk operation.
///
/// An in-memory ordered set, owned by the caller's view and discarded with
/// it. Never persisted; mutated only through its own methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: ItemId) -> bool {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
            return false;
        }
        true
    }

    /// Replace the selection with exactly the given ids (the current
    /// view). Ids from any previous view are dropped, never merged.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True iff every item in a view of `total_count` items is selected.
    /// An empty view is never "all selected".
    pub fn is_all_selected(&self, total_count: usize) -> bool {
        total_count > 0 && self.ids.len() == total_count
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in id order (deterministic outcome ordering depends
    /// on this).
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ItemId> for Selection {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
