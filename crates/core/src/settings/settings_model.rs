//! Split workflow settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// How the value-conservation tolerance is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToleranceMode {
    /// Fixed amount in the position's currency unit.
    #[default]
    Absolute,
    /// Fraction of the larger of the old and new position values.
    Relative,
}

impl ToleranceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToleranceMode::Absolute => "ABSOLUTE",
            ToleranceMode::Relative => "RELATIVE",
        }
    }
}

impl FromStr for ToleranceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ABSOLUTE" => Ok(ToleranceMode::Absolute),
            "RELATIVE" => Ok(ToleranceMode::Relative),
            other => Err(format!("Unknown tolerance mode '{}'", other)),
        }
    }
}

/// Settings that drive the split conservation check and its presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSettings {
    pub value_tolerance: Decimal,
    pub tolerance_mode: ToleranceMode,
    /// Decimal places used when presenting adjusted prices. Never applied to
    /// the conservation check itself.
    pub display_precision: u32,
}

impl Default for SplitSettings {
    fn default() -> Self {
        SplitSettings {
            value_tolerance: Decimal::new(1, 2),
            tolerance_mode: ToleranceMode::Absolute,
            display_precision: DISPLAY_DECIMAL_PRECISION,
        }
    }
}

impl SplitSettings {
    /// Maximum accepted difference between the old and new position value.
    ///
    /// A relative tolerance too large to represent saturates at `Decimal::MAX`.
    pub fn tolerance_for(&self, old_value: Decimal, new_value: Decimal) -> Decimal {
        match self.tolerance_mode {
            ToleranceMode::Absolute => self.value_tolerance,
            ToleranceMode::Relative => self
                .value_tolerance
                .checked_mul(old_value.abs().max(new_value.abs()))
                .unwrap_or(Decimal::MAX),
        }
    }

    pub fn is_within_tolerance(&self, old_value: Decimal, new_value: Decimal) -> bool {
        match old_value.checked_sub(new_value) {
            Some(delta) => delta.abs() <= self.tolerance_for(old_value, new_value),
            None => false,
        }
    }
}
