//! Common utility functions for tax calculations.
//!
//! Rounding and clamping helpers shared by the regime computations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places, sending exact
/// midpoints to the even digit (banker's rounding).
///
/// Used only when a result leaves the engine; intermediate amounts stay
/// unrounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_even;
///
/// assert_eq!(round_half_even(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_even(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_even(dec!(123.445)), dec!(123.44));
/// assert_eq!(round_half_even(dec!(69700.8)).to_string(), "69700.80");
/// ```
pub fn round_half_even(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}
