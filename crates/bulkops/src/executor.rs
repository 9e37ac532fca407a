//! Bulk operation executor.
//!
//! Per invocation: validate the selection, compute every per-item outcome
//! purely, re-check the confirmation gate, then batch all applied outcomes
//! into a single store call. The store call is the only IO point, so
//! partial-failure risk is confined to one round trip instead of N.

use thiserror::Error;
use tracing::{debug, info, warn};

use stockops_inventory::{compute, AdjustmentRequest, ItemCatalog, RejectReason};

use crate::confirm::{self, ConfirmationReason};
use crate::outcome::{AdjustmentSummary, ItemChange, ItemOutcome};
use crate::selection::Selection;
use crate::store::{InventoryStore, StoreError};

/// Structural failure of a bulk operation.
///
/// These abort the whole operation; per-item rejections never appear here,
/// they are collected into the summary instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BulkOpError {
    #[error("selection is empty")]
    EmptySelection,

    #[error("confirmation required: {reason}")]
    ConfirmationRequired { reason: ConfirmationReason },

    #[error("store call failed: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Execution phase, for log correlation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Validating,
    Computing,
    Applying,
    Completed,
}

/// Applies one adjustment across a selection and reports per-item results.
///
/// Holds no per-operation state: concurrent executions against overlapping
/// selections are the caller's responsibility to serialize (typically by
/// disabling the trigger while a call is in flight).
pub struct BulkExecutor<S> {
    store: S,
}

impl<S: InventoryStore> BulkExecutor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Execute `request` against the selected items of `catalog`.
    ///
    /// `confirmed` represents the user having acknowledged a warning
    /// dialog; it is consumed by this call only, never stored. Exactly one
    /// store call is made when at least one outcome applies; caller-held
    /// snapshots are never mutated (refetch after a successful summary).
    pub async fn execute(
        &self,
        selection: &Selection,
        catalog: &ItemCatalog,
        request: &AdjustmentRequest,
        confirmed: bool,
    ) -> Result<AdjustmentSummary, BulkOpError> {
        debug!(
            phase = ?Phase::Validating,
            op = request.kind_name(),
            selected = selection.len(),
            "bulk operation started"
        );

        if selection.is_empty() {
            warn!(op = request.kind_name(), "rejected bulk operation on empty selection");
            return Err(BulkOpError::EmptySelection);
        }

        // Deletions never proceed unconfirmed, and never reach computation
        // or the store.
        if confirm::requires_pre_confirmation(request) && !confirmed {
            return Err(BulkOpError::ConfirmationRequired {
                reason: ConfirmationReason::Deletion,
            });
        }

        debug!(phase = ?Phase::Computing, op = request.kind_name(), "computing per-item outcomes");
        let outcomes: Vec<ItemOutcome> = selection
            .iter()
            .map(|item_id| match catalog.get(item_id) {
                None => ItemOutcome::Rejected {
                    item_id,
                    reason: RejectReason::ItemMissing,
                },
                Some(item) => match compute(item, request, catalog) {
                    Ok(change) => ItemOutcome::Applied(ItemChange { item_id, change }),
                    Err(reason) => ItemOutcome::Rejected { item_id, reason },
                },
            })
            .collect();

        let rejected = outcomes.iter().filter(|o| !o.is_applied()).count();
        if confirm::exceeds_rejection_threshold(rejected, selection.len()) && !confirmed {
            warn!(
                op = request.kind_name(),
                rejected,
                selected = selection.len(),
                "rejection rate above threshold, confirmation required"
            );
            return Err(BulkOpError::ConfirmationRequired {
                reason: ConfirmationReason::HighRejectionRate,
            });
        }

        let applied: Vec<ItemChange> = outcomes
            .iter()
            .filter_map(|o| match o {
                ItemOutcome::Applied(change) => Some(change.clone()),
                ItemOutcome::Rejected { .. } => None,
            })
            .collect();

        // Single batched round trip; nothing to persist means no IO at all.
        if !applied.is_empty() {
            debug!(phase = ?Phase::Applying, batch = applied.len(), "persisting applied outcomes");
            if request.is_deletion() {
                let ids: Vec<_> = applied.iter().map(|c| c.item_id).collect();
                self.store.delete_items(&ids).await?;
            } else {
                self.store.apply_bulk_update(&applied).await?;
            }
        }

        let summary = AdjustmentSummary::from_outcomes(outcomes);
        info!(
            phase = ?Phase::Completed,
            op = request.kind_name(),
            applied = summary.applied,
            rejected = summary.rejected,
            "bulk operation completed"
        );
        Ok(summary)
    }
}
