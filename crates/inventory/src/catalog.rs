use std::collections::{BTreeMap, BTreeSet};

use stockops_core::{CategoryId, ItemId};

use crate::item::InventoryItem;

/// The caller's current inventory view: item snapshots keyed by id plus the
/// set of known categories.
///
/// A catalog is a query-side value, rebuilt whenever the caller refetches
/// its view. Outcome computation validates selected ids and target
/// categories against it without touching the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, InventoryItem>,
    categories: BTreeSet<CategoryId>,
}

impl ItemCatalog {
    pub fn new(
        items: impl IntoIterator<Item = InventoryItem>,
        categories: impl IntoIterator<Item = CategoryId>,
    ) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id, i)).collect(),
            categories: categories.into_iter().collect(),
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.get(&id)
    }

    pub fn category_exists(&self, id: CategoryId) -> bool {
        self.categories.contains(&id)
    }

    /// All item ids in the view, in id order.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
