use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockops_core::{CategoryId, ItemId};

/// Read-only snapshot of an inventory item.
///
/// The canonical record lives in the external inventory store; this core
/// never creates or mutates it directly. Snapshots arrive with the caller's
/// current view and are only ever read during outcome computation and
/// export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category_id: CategoryId,
    pub weight: Decimal,
    pub purchase_price: Decimal,
    pub sell_price: Decimal,
    pub stock: i64,
    pub min_stock: i64,
    pub active: bool,
}

