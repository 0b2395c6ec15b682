//! Progressive tax by marginal accumulation over a [`BracketTable`].
//!
//! Each band contributes `(band width) * rate`; the band holding the taxable
//! income contributes only the part up to that income. An income exactly on
//! an upper bound is taxed entirely within that bound's bands.

use rust_decimal::Decimal;

use crate::BracketTable;

/// Computes unrounded progressive tax on `taxable_income`.
///
/// Non-positive income is untaxed.
pub fn bracket_tax(
    taxable_income: Decimal,
    table: &BracketTable,
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for bracket in table.brackets() {
        match bracket.upper_bound {
            Some(limit) if taxable_income > limit => {
                tax += (limit - previous_bound) * bracket.marginal_rate;
                previous_bound = limit;
            }
            _ => {
                tax += (taxable_income - previous_bound) * bracket.marginal_rate;
                break;
            }
        }
    }

    tax
}
