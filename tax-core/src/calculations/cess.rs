use rust_decimal::Decimal;

/// Health and education cess levied on computed tax (4%).
pub const CESS_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// Adds cess at `rate` to a fully computed progressive tax.
///
/// Apply once per regime, after bracket tax and before rounding.
pub fn with_cess(
    tax: Decimal,
    rate: Decimal,
) -> Decimal {
    debug_assert!(tax >= Decimal::ZERO, "cess applied to negative tax {tax}");
    tax.saturating_mul(Decimal::ONE + rate)
}
