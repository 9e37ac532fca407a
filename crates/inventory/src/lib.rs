//! Inventory domain module.
//!
//! This crate contains the business rules for bulk inventory adjustments,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). The calculator computes per-item outcomes; persistence of the
//! applied outcomes is someone else's job.

pub mod adjustment;
pub mod calc;
pub mod catalog;
pub mod item;

pub use adjustment::{
    AdjustmentRequest, PriceAdjustmentKind, PriceTarget, StockAdjustmentKind,
};
pub use calc::{compute, AppliedChange, PriceChange, PriceField, RejectReason};
pub use catalog::ItemCatalog;
pub use item::InventoryItem;
