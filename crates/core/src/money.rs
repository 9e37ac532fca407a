//! Monetary rounding.
//!
//! All prices in the domain are `rust_decimal::Decimal` and settle to two
//! decimal places after every adjustment, so repeated percentage changes
//! never accumulate sub-cent drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to 2 decimal places, half-up (midpoint away
/// from zero).
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
