//! Tests for applying split ratios to lots.

use super::*;
use crate::holdings::HoldingLot;
use rust_decimal_macros::dec;

fn lot(id: &str, quantity: rust_decimal::Decimal, price: rust_decimal::Decimal) -> HoldingLot {
    HoldingLot::new(id, quantity, price).unwrap()
}

#[test]
fn test_forward_split_doubles_quantity_and_halves_price() {
    let ratio = parse_split_ratio("1/2").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(3), dec!(10)), &ratio).unwrap();

    assert_eq!(adjusted.lot_id, "a");
    assert_eq!(adjusted.original_quantity, dec!(3));
    assert_eq!(adjusted.original_price, dec!(10));
    assert_eq!(adjusted.new_quantity, dec!(6));
    assert_eq!(adjusted.new_price, dec!(5));
    assert_eq!(adjusted.old_value(), adjusted.new_value());
}

#[test]
fn test_non_divisible_ratio_truncates_quantity() {
    let ratio = parse_split_ratio("2/3").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(5), dec!(10)), &ratio).unwrap();

    assert_eq!(adjusted.new_quantity, dec!(7));
    assert_eq!(adjusted.new_price.round_dp(4), dec!(6.6667));
    assert_eq!(adjusted.old_value(), Some(dec!(50)));
    assert_eq!(adjusted.new_value().unwrap().round_dp(2), dec!(46.67));
}

#[test]
fn test_truncation_never_rounds_up() {
    // 7 * 1/2 = 3.5 -> 3
    let ratio = parse_split_ratio("2/1").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(7), dec!(100)), &ratio).unwrap();
    assert_eq!(adjusted.new_quantity, dec!(3));
    assert_eq!(adjusted.new_price, dec!(200));
}

#[test]
fn test_reverse_split_is_exact_for_divisible_quantities() {
    let ratio = parse_split_ratio("3/1").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(3), dec!(7)), &ratio).unwrap();
    assert_eq!(adjusted.new_quantity, dec!(1));
    assert_eq!(adjusted.new_price, dec!(21));
}

#[test]
fn test_zero_price_stays_zero() {
    let ratio = parse_split_ratio("1/2").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(10), dec!(0)), &ratio).unwrap();
    assert_eq!(adjusted.new_quantity, dec!(20));
    assert_eq!(adjusted.new_price, dec!(0));
}

#[test]
fn test_fractional_quantity_lot() {
    let ratio = parse_split_ratio("1/10").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(2.55), dec!(40)), &ratio).unwrap();
    assert_eq!(adjusted.new_quantity, dec!(25));
    assert_eq!(adjusted.new_price, dec!(4));
}

#[test]
fn test_adjust_lots_preserves_order_and_count() {
    let ratio = parse_split_ratio("1:5").unwrap();
    let lots = vec![
        lot("first", dec!(1), dec!(500)),
        lot("second", dec!(2), dec!(450)),
        lot("third", dec!(3), dec!(0)),
    ];

    let adjusted = adjust_lots(&lots, &ratio).unwrap();

    let ids: Vec<_> = adjusted.iter().map(|a| a.lot_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
    assert_eq!(adjusted[1].new_quantity, dec!(10));
    assert_eq!(adjusted[1].new_price, dec!(90));
}

#[test]
fn test_display_price_rounds_for_presentation_only() {
    let ratio = parse_split_ratio("2/3").unwrap();
    let adjusted = adjust_lot(&lot("a", dec!(6), dec!(10)), &ratio).unwrap();
    assert_eq!(adjusted.display_price(2), dec!(6.67));
    assert_ne!(adjusted.new_price, dec!(6.67));
}

#[test]
fn test_quantity_overflow_is_reported_not_panicking() {
    let ratio = parse_split_ratio("1/10").unwrap();
    let big = lot("big", dec!(10000000000000000000000000000), dec!(1));

    assert_eq!(
        adjust_lot(&big, &ratio).unwrap_err(),
        SplitError::ValueOverflow {
            lot_id: "big".to_string(),
            ratio: "1:10".to_string(),
        }
    );

    let lots = vec![lot("small", dec!(1), dec!(1)), big];
    assert!(adjust_lots(&lots, &ratio).is_err());
}

#[test]
fn test_price_overflow_is_reported() {
    let ratio = parse_split_ratio("10:1").unwrap();
    let pricey = lot("pricey", dec!(1), dec!(10000000000000000000000000000));
    assert!(matches!(
        adjust_lot(&pricey, &ratio),
        Err(SplitError::ValueOverflow { .. })
    ));
}

#[test]
fn test_value_accessors_do_not_panic_on_overflow() {
    let ratio = parse_split_ratio("1/2").unwrap();
    let mut adjusted = adjust_lot(&lot("a", dec!(1000000000), dec!(100)), &ratio).unwrap();
    adjusted.new_price = dec!(100000000000000000000000);
    assert_eq!(adjusted.new_value(), None);
    assert_eq!(adjusted.old_value(), Some(dec!(100000000000)));
}
