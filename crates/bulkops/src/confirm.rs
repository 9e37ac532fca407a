//! Confirmation gate for irreversible or surprising operations.
//!
//! Stateless predicates: every execution re-supplies its `confirmed` flag,
//! nothing is remembered between calls.

use serde::{Deserialize, Serialize};

use stockops_inventory::AdjustmentRequest;

/// Why a bulk operation demands an explicit confirmation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationReason {
    /// Deletions are irreversible and always gated.
    Deletion,
    /// More than half of the selection would be rejected.
    HighRejectionRate,
}

impl core::fmt::Display for ConfirmationReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Deletion => f.write_str("deletion is irreversible"),
            Self::HighRejectionRate => f.write_str("most of the selection would be rejected"),
        }
    }
}

/// Gate checked before any computation: deletions never proceed
/// unconfirmed.
pub fn requires_pre_confirmation(request: &AdjustmentRequest) -> bool {
    request.is_deletion()
}

/// Gate checked after computation, before the store call: true when
/// rejected outcomes exceed 50% of the selection.
pub fn exceeds_rejection_threshold(rejected: usize, selected: usize) -> bool {
    selected > 0 && rejected * 2 > selected
}
