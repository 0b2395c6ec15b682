use rust_decimal::Decimal;

use crate::calculations::common::{max, min};

/// Share of basic salary that caps the exemption.
const BASIC_SALARY_CAP: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Share of basic salary that rent must exceed before any of it counts.
const RENT_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// House-rent-allowance exemption: the least of
///
/// 1. the HRA actually received,
/// 2. 50% of basic salary,
/// 3. rent paid in excess of 10% of basic salary (never below zero).
///
/// The result is never negative and never exceeds `hra_received`.
pub fn hra_exemption(
    hra_received: Decimal,
    basic_salary: Decimal,
    rent_paid: Decimal,
) -> Decimal {
    let excess_rent = max(rent_paid - RENT_THRESHOLD * basic_salary, Decimal::ZERO);
    min(min(hra_received, BASIC_SALARY_CAP * basic_salary), excess_rent)
}
