//! Side-by-side regime computation.
//!
//! # Steps
//!
//! | Step | Heavy regime                                   | Light regime               |
//! |------|------------------------------------------------|----------------------------|
//! | 1    | HRA exemption                                  | –                          |
//! | 2    | standard + PT + 80C + 80D + HRA exemption      | standard deduction         |
//! | 3    | taxable = max(0, gross − deductions)           | same                       |
//! | 4    | bracket tax on the heavy table                 | bracket tax on light table |
//! | 5    | cess                                           | cess                       |
//! | 6    | round taxable income and tax to 2 dp           | same                       |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{FinancialInputs, RegimeComparator};
//!
//! let inputs = FinancialInputs {
//!     gross_salary: dec!(1200000),
//!     basic_salary: dec!(600000),
//!     hra_received: dec!(200000),
//!     rent_paid: dec!(300000),
//!     deduction_80c: dec!(150000),
//!     deduction_80d: dec!(25000),
//!     professional_tax: dec!(2400),
//!     tds: dec!(0),
//! };
//!
//! let comparison = RegimeComparator::default().compare(&inputs);
//!
//! assert_eq!(comparison.heavy.taxable_income, dec!(772600.00));
//! assert_eq!(comparison.heavy.tax, dec!(69700.80));
//! assert_eq!(comparison.light.tax, dec!(85800.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::brackets::bracket_tax;
use crate::calculations::cess::{CESS_RATE, with_cess};
use crate::calculations::common::{max, round_half_even};
use crate::calculations::deductions::DeductionPolicy;
use crate::{
    BracketTable, FinancialInputs, RawFinancials, Regime, RegimeComparison, RegimeResult,
};

/// Flat standard deduction available under both regimes.
pub const STANDARD_DEDUCTION: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Slab table and deduction policy of one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub brackets: BracketTable,
    pub deductions: DeductionPolicy,
}

/// Everything the engine can be configured with.
///
/// `Default` gives the statutory tables, a 50,000 standard deduction and 4%
/// cess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub heavy: RegimeRules,
    pub light: RegimeRules,
    pub standard_deduction: Decimal,
    pub cess_rate: Decimal,
}

impl RegimeConfig {
    pub fn rules(
        &self,
        regime: Regime,
    ) -> &RegimeRules {
        match regime {
            Regime::Heavy => &self.heavy,
            Regime::Light => &self.light,
        }
    }
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            heavy: RegimeRules {
                brackets: BracketTable::heavy_regime(),
                deductions: DeductionPolicy::Itemized,
            },
            light: RegimeRules {
                brackets: BracketTable::light_regime(),
                deductions: DeductionPolicy::StandardOnly,
            },
            standard_deduction: STANDARD_DEDUCTION,
            cess_rate: CESS_RATE,
        }
    }
}

/// Computes both regimes for a set of inputs.
///
/// Holds no mutable state; share one instance freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RegimeComparator {
    config: RegimeConfig,
}

impl RegimeComparator {
    pub fn new(config: RegimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Computes both regimes from normalized inputs.
    pub fn compare(
        &self,
        inputs: &FinancialInputs,
    ) -> RegimeComparison {
        let comparison = RegimeComparison {
            heavy: self.evaluate(Regime::Heavy, inputs),
            light: self.evaluate(Regime::Light, inputs),
        };

        tracing::debug!(
            heavy_taxable = %comparison.heavy.taxable_income,
            heavy_tax = %comparison.heavy.tax,
            light_taxable = %comparison.light.taxable_income,
            light_tax = %comparison.light.tax,
            "compared regimes"
        );

        comparison
    }

    /// Normalizes a raw record, then computes both regimes.
    pub fn compare_raw(
        &self,
        raw: &RawFinancials,
    ) -> RegimeComparison {
        self.compare(&FinancialInputs::from_raw(raw))
    }

    /// Taxable income and tax (cess included) for one regime.
    pub fn evaluate(
        &self,
        regime: Regime,
        inputs: &FinancialInputs,
    ) -> RegimeResult {
        let rules = self.config.rules(regime);
        let deductions = rules
            .deductions
            .total(inputs, self.config.standard_deduction);
        let taxable_income = max(inputs.gross_salary - deductions, Decimal::ZERO);
        let tax = with_cess(
            bracket_tax(taxable_income, &rules.brackets),
            self.config.cess_rate,
        );

        RegimeResult {
            taxable_income: round_half_even(taxable_income),
            tax: round_half_even(tax),
        }
    }
}
