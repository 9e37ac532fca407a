use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockops_core::ItemId;
use stockops_inventory::{AppliedChange, RejectReason};

/// One item's persisted mutation, batched with its siblings into a single
/// store call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChange {
    pub item_id: ItemId,
    pub change: AppliedChange,
}

/// Per-item result of a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    Applied(ItemChange),
    Rejected { item_id: ItemId, reason: RejectReason },
}

impl ItemOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// What a bulk operation did, item by item.
///
/// Outcomes are ordered by item id; rejections are collected for display,
/// never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentSummary {
    pub outcomes: Vec<ItemOutcome>,
    pub applied: usize,
    pub rejected: usize,
    pub completed_at: DateTime<Utc>,
}

impl AdjustmentSummary {
    pub fn from_outcomes(outcomes: Vec<ItemOutcome>) -> Self {
        let applied = outcomes.iter().filter(|o| o.is_applied()).count();
        let rejected = outcomes.len() - applied;
        Self {
            outcomes,
            applied,
            rejected,
            completed_at: Utc::now(),
        }
    }

    /// Rejections with their human-readable reasons, for display.
    pub fn rejections(&self) -> impl Iterator<Item = (ItemId, &RejectReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            ItemOutcome::Rejected { item_id, reason } => Some((*item_id, reason)),
            ItemOutcome::Applied(_) => None,
        })
    }

    pub fn is_fully_applied(&self) -> bool {
        self.rejected == 0
    }
}
