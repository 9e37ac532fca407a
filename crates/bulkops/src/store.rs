//! Port to the external inventory store.
//!
//! The executor makes exactly one call here per successful execution. Each
//! call is atomic from this core's perspective: either the whole batch is
//! accepted or the operation failed. Partial-id results are an external
//! contract this core does not consume.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockops_core::ItemId;

use crate::outcome::ItemChange;

/// Store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("inventory store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// External inventory store collaborator.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Persist a batch of non-delete changes in one round trip.
    async fn apply_bulk_update(&self, changes: &[ItemChange]) -> Result<(), StoreError>;

    /// Delete a batch of items in one round trip.
    async fn delete_items(&self, item_ids: &[ItemId]) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn apply_bulk_update(&self, changes: &[ItemChange]) -> Result<(), StoreError> {
        (**self).apply_bulk_update(changes).await
    }

    async fn delete_items(&self, item_ids: &[ItemId]) -> Result<(), StoreError> {
        (**self).delete_items(item_ids).await
    }
}
