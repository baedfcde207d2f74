//! Applies a split ratio to holding lots.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{SplitError, SplitRatio};
use crate::holdings::HoldingLot;

/// A holding lot with its post-split quantity and price.
///
/// `new_quantity` and `new_price` may be hand-edited after computation, so
/// nothing here assumes they still match the ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedLot {
    pub lot_id: String,
    pub original_quantity: Decimal,
    pub original_price: Decimal,
    pub new_quantity: Decimal,
    pub new_price: Decimal,
}

impl AdjustedLot {
    /// `None` when the product does not fit in a `Decimal`.
    pub fn old_value(&self) -> Option<Decimal> {
        self.original_quantity.checked_mul(self.original_price)
    }

    /// `None` when the product does not fit in a `Decimal`.
    pub fn new_value(&self) -> Option<Decimal> {
        self.new_quantity.checked_mul(self.new_price)
    }

    /// Price rounded for presentation. The conservation check uses `new_price`.
    pub fn display_price(&self, precision: u32) -> Decimal {
        self.new_price
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Computes the post-split values of one lot.
///
/// Quantity is truncated to whole units so the resulting share count is never
/// overstated; price is left unrounded. Both are computed from the integer
/// ratio components rather than the rounded multiplier so that e.g. a 3:1
/// consolidation of 3 units yields exactly 1.
///
/// Fails with [`SplitError::ValueOverflow`] when the scaled quantity or price
/// does not fit in a `Decimal`.
pub fn adjust_lot(lot: &HoldingLot, ratio: &SplitRatio) -> Result<AdjustedLot, SplitError> {
    let numerator = Decimal::from(ratio.numerator());
    let denominator = Decimal::from(ratio.denominator());
    let overflow = || SplitError::ValueOverflow {
        lot_id: lot.id.clone(),
        ratio: ratio.to_string(),
    };

    let new_quantity = lot
        .quantity
        .checked_mul(denominator)
        .and_then(|scaled| scaled.checked_div(numerator))
        .ok_or_else(overflow)?
        .floor();
    let new_price = if lot.price.is_zero() {
        Decimal::ZERO
    } else {
        lot.price
            .checked_mul(numerator)
            .and_then(|scaled| scaled.checked_div(denominator))
            .ok_or_else(overflow)?
            .normalize()
    };

    Ok(AdjustedLot {
        lot_id: lot.id.clone(),
        original_quantity: lot.quantity,
        original_price: lot.price,
        new_quantity,
        new_price,
    })
}

/// Adjusts every lot, one output per input in the same order.
pub fn adjust_lots(
    lots: &[HoldingLot],
    ratio: &SplitRatio,
) -> Result<Vec<AdjustedLot>, SplitError> {
    lots.iter().map(|lot| adjust_lot(lot, ratio)).collect()
}
