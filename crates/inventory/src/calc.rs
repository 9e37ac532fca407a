//! Pure per-item adjustment computation.
//!
//! `compute` turns one item snapshot plus one request into either the
//! change that would be persisted or the reason the item is skipped. It
//! performs no IO and never mutates the snapshot; batching the applied
//! changes into a store call is the executor's concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockops_core::{round2, CategoryId};

use crate::adjustment::{
    AdjustmentRequest, PriceAdjustmentKind, PriceTarget, StockAdjustmentKind,
};
use crate::catalog::ItemCatalog;
use crate::item::InventoryItem;

/// A price field on the item snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Purchase,
    Sell,
}

impl core::fmt::Display for PriceField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Purchase => f.write_str("purchase"),
            Self::Sell => f.write_str("sell"),
        }
    }
}

/// Previous/new value pair for one price field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub previous: Decimal,
    pub new: Decimal,
}

/// The change that would be persisted for one item.
///
/// Carries previous values alongside new ones so the caller can display
/// what a confirmed operation did (or a previewed one would do).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum AppliedChange {
    Category {
        previous: CategoryId,
        new: CategoryId,
    },
    Price {
        purchase: Option<PriceChange>,
        sell: Option<PriceChange>,
    },
    Stock {
        previous: i64,
        new: i64,
    },
    Status {
        previous: bool,
        new: bool,
    },
    Delete,
}

/// Why an item was skipped by a bulk adjustment.
///
/// Rejections are values collected into the summary, not errors: one
/// rejected item never aborts the rest of the selection.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("{field} price would become negative ({computed})")]
    PriceWouldBeNegative { field: PriceField, computed: Decimal },

    #[error("{field} price adjustment exceeds the representable range")]
    PriceOutOfRange { field: PriceField },

    #[error("stock level cannot be set below zero ({requested})")]
    NegativeStockLevel { requested: i64 },

    #[error("unknown category: {category_id}")]
    UnknownCategory { category_id: CategoryId },

    #[error("item is not part of the current view")]
    ItemMissing,
}

/// Compute the outcome of applying `request` to `item`.
///
/// Monetary results settle to 2 decimal places (half-up). A computed
/// negative price rejects the item rather than clamping; stock
/// increment/decrement clamps at zero, while an absolute `Set` below zero
/// rejects. Target categories are validated against the catalog.
pub fn compute(
    item: &InventoryItem,
    request: &AdjustmentRequest,
    catalog: &ItemCatalog,
) -> Result<AppliedChange, RejectReason> {
    match request {
        AdjustmentRequest::CategoryChange { new_category_id } => {
            if !catalog.category_exists(*new_category_id) {
                return Err(RejectReason::UnknownCategory {
                    category_id: *new_category_id,
                });
            }
            Ok(AppliedChange::Category {
                previous: item.category_id,
                new: *new_category_id,
            })
        }
        AdjustmentRequest::PriceAdjustment {
            kind,
            value,
            apply_to,
        } => {
            let purchase = if apply_to.touches_purchase() {
                Some(adjust_price(
                    PriceField::Purchase,
                    item.purchase_price,
                    *kind,
                    *value,
                )?)
            } else {
                None
            };
            let sell = if apply_to.touches_sell() {
                Some(adjust_price(PriceField::Sell, item.sell_price, *kind, *value)?)
            } else {
                None
            };
            Ok(AppliedChange::Price { purchase, sell })
        }
        AdjustmentRequest::StockAdjustment { kind, value } => {
            let new = match kind {
                StockAdjustmentKind::Set => {
                    if *value < 0 {
                        return Err(RejectReason::NegativeStockLevel { requested: *value });
                    }
                    *value
                }
                // Relative adjustments drain to empty rather than reject.
                StockAdjustmentKind::Increment => item.stock.saturating_add(*value).max(0),
                StockAdjustmentKind::Decrement => item.stock.saturating_sub(*value).max(0),
            };
            Ok(AppliedChange::Stock {
                previous: item.stock,
                new,
            })
        }
        AdjustmentRequest::StatusChange { active } => Ok(AppliedChange::Status {
            previous: item.active,
            new: *active,
        }),
        AdjustmentRequest::Deletion => Ok(AppliedChange::Delete),
    }
}

fn adjust_price(
    field: PriceField,
    old: Decimal,
    kind: PriceAdjustmentKind,
    value: Decimal,
) -> Result<PriceChange, RejectReason> {
    // Checked arithmetic: `Decimal` panics on overflow, and a request is
    // never allowed to crash outcome computation.
    let raw = match kind {
        PriceAdjustmentKind::Percentage => value
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|fraction| Decimal::ONE.checked_add(fraction))
            .and_then(|factor| old.checked_mul(factor)),
        PriceAdjustmentKind::Fixed => old.checked_add(value),
    };
    let Some(raw) = raw else {
        return Err(RejectReason::PriceOutOfRange { field });
    };
    let new = round2(raw);
    if new < Decimal::ZERO {
        return Err(RejectReason::PriceWouldBeNegative {
            field,
            computed: new,
        });
    }
    Ok(PriceChange { previous: old, new })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockops_core::ItemId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn test_item() -> InventoryItem {
        InventoryItem {
            id: ItemId::new(),
            name: "Widget".to_string(),
            category_id: CategoryId::new(),
            weight: dec("0.5"),
            purchase_price: dec("80.00"),
            sell_price: dec("100.00"),
            stock: 5,
            min_stock: 2,
            active: true,
        }
    }

    fn no_categories() -> ItemCatalog {
        ItemCatalog::default()
    }

    #[test]
    fn percentage_increase_on_sell_price() {
        let item = test_item();
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Percentage,
            value: dec("15"),
            apply_to: PriceTarget::Sell,
        };

        let change = compute(&item, &request, &no_categories()).unwrap();
        match change {
            AppliedChange::Price { purchase, sell } => {
                assert!(purchase.is_none());
                let sell = sell.unwrap();
                assert_eq!(sell.previous, dec("100.00"));
                assert_eq!(sell.new, dec("115.00"));
            }
            other => panic!("expected Price change, got {other:?}"),
        }
    }

    #[test]
    fn percentage_applies_to_both_fields_independently() {
        let item = test_item();
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Percentage,
            value: dec("-10"),
            apply_to: PriceTarget::Both,
        };

        let change = compute(&item, &request, &no_categories()).unwrap();
        match change {
            AppliedChange::Price { purchase, sell } => {
                assert_eq!(purchase.unwrap().new, dec("72.00"));
                assert_eq!(sell.unwrap().new, dec("90.00"));
            }
            other => panic!("expected Price change, got {other:?}"),
        }
    }

    #[test]
    fn percentage_result_rounds_half_up() {
        let mut item = test_item();
        item.sell_price = dec("2.50");
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Percentage,
            value: dec("7"),
            apply_to: PriceTarget::Sell,
        };

        // 2.50 * 1.07 = 2.675 -> 2.68
        let change = compute(&item, &request, &no_categories()).unwrap();
        match change {
            AppliedChange::Price { sell, .. } => assert_eq!(sell.unwrap().new, dec("2.68")),
            other => panic!("expected Price change, got {other:?}"),
        }
    }

    #[test]
    fn negative_computed_price_is_rejected_not_clamped() {
        let item = test_item();
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Fixed,
            value: dec("-150.00"),
            apply_to: PriceTarget::Sell,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        match err {
            RejectReason::PriceWouldBeNegative { field, computed } => {
                assert_eq!(field, PriceField::Sell);
                assert_eq!(computed, dec("-50.00"));
            }
            other => panic!("expected PriceWouldBeNegative, got {other:?}"),
        }
    }

    #[test]
    fn percentage_below_minus_hundred_rejects() {
        let item = test_item();
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Percentage,
            value: dec("-110"),
            apply_to: PriceTarget::Purchase,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::PriceWouldBeNegative {
                field: PriceField::Purchase,
                ..
            }
        ));
    }

    #[test]
    fn both_target_rejects_when_either_field_goes_negative() {
        // Purchase 80 - 90 < 0, sell 100 - 90 >= 0: the item rejects.
        let item = test_item();
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Fixed,
            value: dec("-90.00"),
            apply_to: PriceTarget::Both,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::PriceWouldBeNegative {
                field: PriceField::Purchase,
                ..
            }
        ));
    }

    #[test]
    fn fixed_adjustment_beyond_range_rejects_instead_of_overflowing() {
        let mut item = test_item();
        item.sell_price = Decimal::MAX;
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Fixed,
            value: Decimal::MAX,
            apply_to: PriceTarget::Sell,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert_eq!(
            err,
            RejectReason::PriceOutOfRange {
                field: PriceField::Sell
            }
        );
    }

    #[test]
    fn percentage_adjustment_beyond_range_rejects_instead_of_overflowing() {
        let mut item = test_item();
        item.purchase_price = Decimal::MAX;
        let request = AdjustmentRequest::PriceAdjustment {
            kind: PriceAdjustmentKind::Percentage,
            value: dec("100"),
            apply_to: PriceTarget::Both,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert_eq!(
            err,
            RejectReason::PriceOutOfRange {
                field: PriceField::Purchase
            }
        );
    }

    #[test]
    fn stock_set_replaces_level() {
        let item = test_item();
        let request = AdjustmentRequest::StockAdjustment {
            kind: StockAdjustmentKind::Set,
            value: 42,
        };

        let change = compute(&item, &request, &no_categories()).unwrap();
        assert_eq!(
            change,
            AppliedChange::Stock {
                previous: 5,
                new: 42
            }
        );
    }

    #[test]
    fn stock_set_below_zero_rejects() {
        let item = test_item();
        let request = AdjustmentRequest::StockAdjustment {
            kind: StockAdjustmentKind::Set,
            value: -1,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert_eq!(err, RejectReason::NegativeStockLevel { requested: -1 });
    }

    #[test]
    fn stock_decrement_clamps_at_zero() {
        let item = test_item();
        let request = AdjustmentRequest::StockAdjustment {
            kind: StockAdjustmentKind::Decrement,
            value: 20,
        };

        let change = compute(&item, &request, &no_categories()).unwrap();
        assert_eq!(change, AppliedChange::Stock { previous: 5, new: 0 });
    }

    #[test]
    fn stock_increment_adds() {
        let item = test_item();
        let request = AdjustmentRequest::StockAdjustment {
            kind: StockAdjustmentKind::Increment,
            value: 7,
        };

        let change = compute(&item, &request, &no_categories()).unwrap();
        assert_eq!(change, AppliedChange::Stock { previous: 5, new: 12 });
    }

    #[test]
    fn category_change_requires_known_category() {
        let item = test_item();
        let target = CategoryId::new();
        let request = AdjustmentRequest::CategoryChange {
            new_category_id: target,
        };

        let err = compute(&item, &request, &no_categories()).unwrap_err();
        assert_eq!(err, RejectReason::UnknownCategory { category_id: target });

        let known = ItemCatalog::new([], [target]);
        let change = compute(&item, &request, &known).unwrap();
        assert_eq!(
            change,
            AppliedChange::Category {
                previous: item.category_id,
                new: target
            }
        );
    }

    #[test]
    fn status_change_records_previous_flag() {
        let item = test_item();
        let request = AdjustmentRequest::StatusChange { active: false };

        let change = compute(&item, &request, &no_categories()).unwrap();
        assert_eq!(
            change,
            AppliedChange::Status {
                previous: true,
                new: false
            }
        );
    }

    #[test]
    fn status_change_to_current_value_still_applies() {
        let item = test_item();
        let request = AdjustmentRequest::StatusChange { active: true };

        let change = compute(&item, &request, &no_categories()).unwrap();
        assert_eq!(
            change,
            AppliedChange::Status {
                previous: true,
                new: true
            }
        );
    }

    #[test]
    fn deletion_always_computes_a_delete_marker() {
        let item = test_item();
        let change = compute(&item, &AdjustmentRequest::Deletion, &no_categories()).unwrap();
        assert_eq!(change, AppliedChange::Delete);
    }

    #[test]
    fn reject_reasons_are_human_readable() {
        let reason = RejectReason::PriceWouldBeNegative {
            field: PriceField::Sell,
            computed: dec("-0.50"),
        };
        assert_eq!(
            reason.to_string(),
            "sell price would become negative (-0.50)"
        );

        assert_eq!(
            RejectReason::ItemMissing.to_string(),
            "item is not part of the current view"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn price_cents() -> impl Strategy<Value = Decimal> {
            // Prices between 0.00 and 10_000.00.
            (0i64..=1_000_000).prop_map(|c| Decimal::new(c, 2))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: percentage adjustments down to -100% on a
            /// non-negative price never reject.
            #[test]
            fn percentage_within_minus_hundred_never_rejects(
                price in price_cents(),
                pct in -100i64..=500
            ) {
                let mut item = test_item();
                item.sell_price = price;
                let request = AdjustmentRequest::PriceAdjustment {
                    kind: PriceAdjustmentKind::Percentage,
                    value: Decimal::from(pct),
                    apply_to: PriceTarget::Sell,
                };

                let change = compute(&item, &request, &no_categories());
                prop_assert!(change.is_ok(), "rejected: {:?}", change);
            }

            /// Property: an applied price change never carries a negative
            /// new value and always has at most 2 decimal places.
            #[test]
            fn applied_prices_are_non_negative_and_rounded(
                price in price_cents(),
                value in -50_000i64..=50_000
            ) {
                let mut item = test_item();
                item.purchase_price = price;
                let request = AdjustmentRequest::PriceAdjustment {
                    kind: PriceAdjustmentKind::Fixed,
                    value: Decimal::new(value, 2),
                    apply_to: PriceTarget::Purchase,
                };

                if let Ok(AppliedChange::Price { purchase: Some(p), .. }) =
                    compute(&item, &request, &no_categories())
                {
                    prop_assert!(p.new >= Decimal::ZERO);
                    prop_assert!(p.new.scale() <= 2);
                }
            }

            /// Property: relative stock adjustments never produce a
            /// negative level (clamping policy).
            #[test]
            fn relative_stock_never_goes_negative(
                stock in 0i64..=10_000,
                delta in 0i64..=20_000,
                decrement in proptest::bool::ANY
            ) {
                let mut item = test_item();
                item.stock = stock;
                let kind = if decrement {
                    StockAdjustmentKind::Decrement
                } else {
                    StockAdjustmentKind::Increment
                };
                let request = AdjustmentRequest::StockAdjustment { kind, value: delta };

                match compute(&item, &request, &no_categories()).unwrap() {
                    AppliedChange::Stock { previous, new } => {
                        prop_assert_eq!(previous, stock);
                        prop_assert!(new >= 0);
                    }
                    other => prop_assert!(false, "expected Stock change, got {:?}", other),
                }
            }

            /// Property: compute is deterministic.
            #[test]
            fn compute_is_deterministic(
                price in price_cents(),
                pct in -200i64..=200
            ) {
                let mut item = test_item();
                item.sell_price = price;
                let request = AdjustmentRequest::PriceAdjustment {
                    kind: PriceAdjustmentKind::Percentage,
                    value: Decimal::from(pct),
                    apply_to: PriceTarget::Both,
                };

                let first = compute(&item, &request, &no_categories());
                let second = compute(&item, &request, &no_categories());
                prop_assert_eq!(first, second);
            }
        }
    }
}
