use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FinancialInputs;
use crate::calculations::hra::hra_exemption;

/// Which deductions a regime allows against gross salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// Standard deduction only.
    StandardOnly,
    /// Standard deduction, professional tax, 80C, 80D and the HRA exemption.
    Itemized,
}

impl DeductionPolicy {
    /// Total amount deducted from gross salary under this policy.
    pub fn total(
        &self,
        inputs: &FinancialInputs,
        standard_deduction: Decimal,
    ) -> Decimal {
        match self {
            Self::StandardOnly => standard_deduction,
            Self::Itemized => {
                let exemption =
                    hra_exemption(inputs.hra_received, inputs.basic_salary, inputs.rent_paid);
                total_deductions(inputs, standard_deduction, exemption)
            }
        }
    }
}

/// Sums every deduction the itemized regime permits.
///
/// Saturates at [`Decimal::MAX`] rather than overflowing.
pub fn total_deductions(
    inputs: &FinancialInputs,
    standard_deduction: Decimal,
    hra_exemption: Decimal,
) -> Decimal {
    [
        inputs.professional_tax,
        inputs.deduction_80c,
        inputs.deduction_80d,
        hra_exemption,
    ]
    .into_iter()
    .fold(standard_deduction, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn inputs() -> FinancialInputs {
        FinancialInputs {
            gross_salary: dec!(1200000),
            basic_salary: dec!(600000),
            hra_received: dec!(200000),
            rent_paid: dec!(300000),
            deduction_80c: dec!(150000),
            deduction_80d: dec!(25000),
            professional_tax: dec!(2400),
            tds: dec!(90000),
        }
    }

    #[test]
    fn total_deductions_sums_all_components() {
        let result = total_deductions(&inputs(), dec!(50000), dec!(200000));

        // 50000 + 2400 + 150000 + 25000 + 200000
        assert_eq!(result, dec!(427400));
    }

    #[test]
    fn total_deductions_ignores_tds() {
        let mut no_tds = inputs();
        no_tds.tds = Decimal::ZERO;

        assert_eq!(
            total_deductions(&no_tds, dec!(50000), dec!(0)),
            total_deductions(&inputs(), dec!(50000), dec!(0))
        );
    }

    #[test]
    fn total_deductions_saturates_at_decimal_max() {
        let huge = FinancialInputs {
            deduction_80c: Decimal::MAX,
            deduction_80d: Decimal::MAX,
            ..inputs()
        };

        assert_eq!(total_deductions(&huge, dec!(50000), dec!(200000)), Decimal::MAX);
    }

    #[test]
    fn itemized_policy_includes_hra_exemption() {
        let result = DeductionPolicy::Itemized.total(&inputs(), dec!(50000));

        assert_eq!(result, dec!(427400));
    }

    #[test]
    fn standard_only_policy_ignores_itemized_amounts() {
        let result = DeductionPolicy::StandardOnly.total(&inputs(), dec!(50000));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn itemized_policy_with_empty_inputs_is_standard_deduction() {
        let result = DeductionPolicy::Itemized.total(&FinancialInputs::default(), dec!(50000));

        assert_eq!(result, dec!(50000));
    }
}
