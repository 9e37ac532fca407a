use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockops_core::CategoryId;

/// How a price adjustment value is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceAdjustmentKind {
    /// `value` is a percentage of the current price; negative decreases.
    Percentage,
    /// `value` is an absolute amount added to the current price.
    Fixed,
}

/// Which price field(s) an adjustment targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTarget {
    Purchase,
    Sell,
    Both,
}

impl PriceTarget {
    pub fn touches_purchase(self) -> bool {
        matches!(self, Self::Purchase | Self::Both)
    }

    pub fn touches_sell(self) -> bool {
        matches!(self, Self::Sell | Self::Both)
    }
}

/// How a stock adjustment value is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAdjustmentKind {
    /// `value` replaces the stock level.
    Set,
    /// `value` is added to the stock level.
    Increment,
    /// `value` is subtracted from the stock level.
    Decrement,
}

/// A single bulk adjustment, applied to every selected item.
///
/// One variant per operation: the enum makes invalid combinations (say, a
/// deletion carrying a price value) unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AdjustmentRequest {
    CategoryChange {
        new_category_id: CategoryId,
    },
    PriceAdjustment {
        kind: PriceAdjustmentKind,
        value: Decimal,
        apply_to: PriceTarget,
    },
    StockAdjustment {
        kind: StockAdjustmentKind,
        value: i64,
    },
    StatusChange {
        active: bool,
    },
    Deletion,
}

impl AdjustmentRequest {
    pub fn is_deletion(&self) -> bool {
        matches!(self, Self::Deletion)
    }

    /// Stable operation name for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::CategoryChange { .. } => "category_change",
            Self::PriceAdjustment { .. } => "price_adjustment",
            Self::StockAdjustment { .. } => "stock_adjustment",
            Self::StatusChange { .. } => "status_change",
            Self::Deletion => "deletion",
        }
    }
}
