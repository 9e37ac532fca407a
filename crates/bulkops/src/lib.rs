//! Bulk inventory operations.
//!
//! Everything between "the user picked these rows" and "the store was asked
//! to mutate them once": selection tracking, the confirmation gate for
//! destructive or high-rejection operations, the executor that batches
//! applied outcomes into a single store call, and the export formatter.

pub mod confirm;
pub mod executor;
pub mod export;
pub mod outcome;
pub mod selection;
pub mod store;

pub use confirm::ConfirmationReason;
pub use executor::{BulkExecutor, BulkOpError};
pub use export::{ExportEncoder, ExportError, ExportFormat, Exporter};
pub use outcome::{AdjustmentSummary, ItemChange, ItemOutcome};
pub use selection::Selection;
pub use store::{InventoryStore, StoreError};
