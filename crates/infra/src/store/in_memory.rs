use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use stockops_bulkops::{InventoryStore, ItemChange, StoreError};
use stockops_core::ItemId;
use stockops_inventory::{AppliedChange, InventoryItem};

/// How many times each store operation was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCallCounts {
    pub updates: usize,
    pub deletes: usize,
}

/// In-memory inventory store.
///
/// Intended for tests/dev. Applies each batch atomically under one write
/// lock; supports injecting a failure on the next call to exercise the
/// store-unavailable path.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: RwLock<BTreeMap<ItemId, InventoryItem>>,
    calls: RwLock<StoreCallCounts>,
    fail_next: AtomicBool,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|i| (i.id, i)).collect()),
            ..Self::default()
        }
    }

    /// Make the next store call fail with `StoreError::Unavailable`.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn call_counts(&self) -> StoreCallCounts {
        *self.calls.read().expect("call counter lock poisoned")
    }

    /// Snapshot of the stored items, in id order.
    pub fn items(&self) -> Vec<InventoryItem> {
        self.items
            .read()
            .expect("item map lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: ItemId) -> Option<InventoryItem> {
        self.items
            .read()
            .expect("item map lock poisoned")
            .get(&id)
            .cloned()
    }

    fn check_failure_injection(&self) -> Result<(), StoreError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected failure"));
        }
        Ok(())
    }

    fn apply_change(item: &mut InventoryItem, change: &AppliedChange) {
        match change {
            AppliedChange::Category { new, .. } => item.category_id = *new,
            AppliedChange::Price { purchase, sell } => {
                if let Some(p) = purchase {
                    item.purchase_price = p.new;
                }
                if let Some(s) = sell {
                    item.sell_price = s.new;
                }
            }
            AppliedChange::Stock { new, .. } => item.stock = *new,
            AppliedChange::Status { new, .. } => item.active = *new,
            // Deletions arrive via delete_items; a delete marker in an
            // update batch is treated the same way.
            AppliedChange::Delete => {}
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn apply_bulk_update(&self, changes: &[ItemChange]) -> Result<(), StoreError> {
        {
            let mut calls = self
                .calls
                .write()
                .map_err(|_| StoreError::unavailable("lock poisoned"))?;
            calls.updates += 1;
        }
        self.check_failure_injection()?;

        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        for change in changes {
            if let AppliedChange::Delete = change.change {
                items.remove(&change.item_id);
                continue;
            }
            if let Some(item) = items.get_mut(&change.item_id) {
                Self::apply_change(item, &change.change);
            }
        }

        debug!(batch = changes.len(), "applied bulk update");
        Ok(())
    }

    async fn delete_items(&self, item_ids: &[ItemId]) -> Result<(), StoreError> {
        {
            let mut calls = self
                .calls
                .write()
                .map_err(|_| StoreError::unavailable("lock poisoned"))?;
            calls.deletes += 1;
        }
        self.check_failure_injection()?;

        let mut items = self
            .items
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        for id in item_ids {
            items.remove(id);
        }

        debug!(batch = item_ids.len(), "deleted items");
        Ok(())
    }
}
