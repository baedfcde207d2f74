//! Value-conservation check for adjusted lots.
//!
//! A split must not change what a position is worth: `old_qty * old_price`
//! and `new_qty * new_price` have to agree within the configured tolerance.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AdjustedLot;
use crate::constants::DECIMAL_PRECISION;
use crate::settings::SplitSettings;

/// Outcome of the conservation check for one lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotValidation {
    pub is_valid: bool,
    pub message: Option<String>,
}

impl LotValidation {
    pub fn valid() -> Self {
        LotValidation {
            is_valid: true,
            message: None,
        }
    }

    pub fn mismatch(old_value: Decimal, new_value: Decimal) -> Self {
        LotValidation {
            is_valid: false,
            message: Some(format!(
                "Value mismatch: {} ≠ {}",
                format_value(old_value),
                format_value(new_value)
            )),
        }
    }

    /// The lot's value cannot be computed within the decimal range.
    pub fn unrepresentable(lot: &AdjustedLot) -> Self {
        LotValidation {
            is_valid: false,
            message: Some(format!(
                "Value too large to check: {} × {}",
                lot.new_quantity, lot.new_price
            )),
        }
    }

    /// The adjusted values break the lot invariant (`quantity > 0`, `price >= 0`).
    pub fn out_of_range(lot: &AdjustedLot) -> Self {
        LotValidation {
            is_valid: false,
            message: Some(format!(
                "Invalid adjusted values: quantity {} must be positive and price {} must not be negative",
                lot.new_quantity, lot.new_price
            )),
        }
    }
}

fn format_value(value: Decimal) -> Decimal {
    value.round_dp(DECIMAL_PRECISION).normalize()
}

/// Checks one lot against the tolerance in `settings`, at full precision.
///
/// Rows whose quantity is not positive, whose price is negative, or whose
/// value overflows the decimal range are invalid regardless of tolerance.
pub fn validate_lot(lot: &AdjustedLot, settings: &SplitSettings) -> LotValidation {
    if lot.new_quantity <= Decimal::ZERO || lot.new_price < Decimal::ZERO {
        warn!(
            "Lot {} has out-of-range adjusted values: {} @ {}",
            lot.lot_id, lot.new_quantity, lot.new_price
        );
        return LotValidation::out_of_range(lot);
    }

    let (Some(old_value), Some(new_value)) = (lot.old_value(), lot.new_value()) else {
        warn!(
            "Lot {} value overflows: {} @ {}",
            lot.lot_id, lot.new_quantity, lot.new_price
        );
        return LotValidation::unrepresentable(lot);
    };

    if settings.is_within_tolerance(old_value, new_value) {
        LotValidation::valid()
    } else {
        warn!(
            "Lot {} fails value check: {} vs {} (tolerance {} {:?})",
            lot.lot_id, old_value, new_value, settings.value_tolerance, settings.tolerance_mode
        );
        LotValidation::mismatch(old_value, new_value)
    }
}

/// True iff at least one lot failed the check.
pub fn has_errors<'a, I>(validations: I) -> bool
where
    I: IntoIterator<Item = &'a LotValidation>,
{
    validations.into_iter().any(|v| !v.is_valid)
}

/// Batch totals shown alongside the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConservationSummary {
    pub total_old_value: Option<Decimal>,
    pub total_new_value: Option<Decimal>,
    pub total_delta: Option<Decimal>,
    /// Indexes of rows failing the check.
    pub invalid_rows: Vec<usize>,
}

impl ConservationSummary {
    /// Totals are `None` when a lot value or the sum does not fit in a `Decimal`.
    pub fn from_lots(lots: &[AdjustedLot], settings: &SplitSettings) -> Self {
        let total_old_value = checked_total(lots.iter().map(AdjustedLot::old_value));
        let total_new_value = checked_total(lots.iter().map(AdjustedLot::new_value));
        let total_delta = match (total_old_value, total_new_value) {
            (Some(old), Some(new)) => old.checked_sub(new).map(|delta| delta.abs()),
            _ => None,
        };
        let invalid_rows = lots
            .iter()
            .enumerate()
            .filter(|(_, lot)| !validate_lot(lot, settings).is_valid)
            .map(|(index, _)| index)
            .collect();

        ConservationSummary {
            total_old_value,
            total_new_value,
            total_delta,
            invalid_rows,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.invalid_rows.is_empty()
    }
}

fn checked_total(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |total, value| {
        total?.checked_add(value?)
    })
}
