//! Tests for the value-conservation check.

use super::*;
use crate::holdings::HoldingLot;
use crate::settings::{SplitSettings, ToleranceMode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn adjusted(quantity: Decimal, price: Decimal, ratio: &str) -> AdjustedLot {
    let lot = HoldingLot::new("lot", quantity, price).unwrap();
    adjust_lot(&lot, &parse_split_ratio(ratio).unwrap()).unwrap()
}

#[test]
fn test_clean_split_is_valid() {
    let validation = validate_lot(&adjusted(dec!(3), dec!(10), "1/2"), &SplitSettings::default());
    assert!(validation.is_valid);
    assert_eq!(validation.message, None);
}

#[test]
fn test_non_divisible_split_is_flagged() {
    let validation = validate_lot(&adjusted(dec!(5), dec!(10), "2/3"), &SplitSettings::default());
    assert!(!validation.is_valid);
    assert_eq!(
        validation.message.as_deref(),
        Some("Value mismatch: 50 ≠ 46.666667")
    );
}

#[test]
fn test_zero_price_lot_is_valid() {
    let validation = validate_lot(&adjusted(dec!(10), dec!(0), "1/2"), &SplitSettings::default());
    assert!(validation.is_valid);
}

#[test]
fn test_tolerance_boundary_is_inclusive() {
    let mut lot = adjusted(dec!(10), dec!(10), "1/1");
    let settings = SplitSettings::default();

    lot.new_price = dec!(9.999);
    assert!(validate_lot(&lot, &settings).is_valid, "delta 0.01 is within tolerance");

    lot.new_price = dec!(9.998);
    assert!(!validate_lot(&lot, &settings).is_valid, "delta 0.02 exceeds tolerance");
}

#[test]
fn test_hand_corrected_quantity_and_price_close_the_gap() {
    let mut lot = adjusted(dec!(5), dec!(10), "2/3");
    lot.new_quantity = dec!(7.5);
    lot.new_price = dec!(6.6666667);
    assert!(validate_lot(&lot, &SplitSettings::default()).is_valid);
}

#[test]
fn test_relative_tolerance_accepts_large_positions() {
    let lot = adjusted(dec!(1000001), dec!(100), "2/1");
    let absolute = SplitSettings::default();
    let relative = SplitSettings {
        value_tolerance: dec!(0.0001),
        tolerance_mode: ToleranceMode::Relative,
        ..SplitSettings::default()
    };

    assert!(!validate_lot(&lot, &absolute).is_valid);
    assert!(validate_lot(&lot, &relative).is_valid);
}

#[test]
fn test_has_errors_requires_one_failure() {
    let valid = LotValidation::valid();
    let invalid = LotValidation::mismatch(dec!(1), dec!(2));

    assert!(!has_errors(&[]));
    assert!(!has_errors(&[valid.clone(), valid.clone()]));
    assert!(has_errors(&[valid, invalid]));
}

#[test]
fn test_summary_totals_and_invalid_rows() {
    let lots = vec![
        adjusted(dec!(2), dec!(10), "2/3"),
        adjusted(dec!(5), dec!(10), "2/3"),
    ];

    let summary = ConservationSummary::from_lots(&lots, &SplitSettings::default());

    assert_eq!(summary.total_old_value, Some(dec!(70)));
    assert_eq!(summary.invalid_rows, vec![1]);
    assert!(summary.has_errors());
    assert!(summary.total_delta.unwrap() > dec!(3));
}

#[test]
fn test_negated_values_are_invalid_even_when_value_matches() {
    let mut lot = adjusted(dec!(3), dec!(10), "1/2");
    lot.new_quantity = dec!(-6);
    lot.new_price = dec!(-5);

    let validation = validate_lot(&lot, &SplitSettings::default());
    assert!(!validation.is_valid);
    assert!(validation.message.unwrap().starts_with("Invalid adjusted values"));
}

#[test]
fn test_zero_quantity_row_is_invalid() {
    let mut lot = adjusted(dec!(10), dec!(0), "1/2");
    lot.new_quantity = Decimal::ZERO;
    assert!(!validate_lot(&lot, &SplitSettings::default()).is_valid);
}

#[test]
fn test_overflowing_value_is_invalid_not_panicking() {
    let mut lot = adjusted(dec!(1000000000), dec!(100), "1/2");
    lot.new_price = dec!(100000000000000000000000);

    let validation = validate_lot(&lot, &SplitSettings::default());
    assert!(!validation.is_valid);
    assert!(validation.message.unwrap().starts_with("Value too large to check"));

    let summary = ConservationSummary::from_lots(&[lot], &SplitSettings::default());
    assert_eq!(summary.total_new_value, None);
    assert_eq!(summary.total_delta, None);
    assert_eq!(summary.invalid_rows, vec![0]);
}
