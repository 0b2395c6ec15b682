use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two mutually exclusive schemes a filer chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Legacy ("old") scheme: itemized deductions and the HRA exemption apply.
    Heavy,
    /// Simplified ("new") scheme: only the standard deduction applies.
    Light,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Self::Heavy, Self::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heavy => "heavy",
            Self::Light => "light",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Heavy => "Old Regime",
            Self::Light => "New Regime",
        }
    }
}

/// Outcome for one regime, rounded to two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub taxable_income: Decimal,
    pub tax: Decimal,
}

/// Side-by-side results for both regimes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub heavy: RegimeResult,
    pub light: RegimeResult,
}

impl RegimeComparison {
    pub fn result(
        &self,
        regime: Regime,
    ) -> &RegimeResult {
        match regime {
            Regime::Heavy => &self.heavy,
            Regime::Light => &self.light,
        }
    }

    /// The regime with the lower tax; ties go to the simpler light regime.
    pub fn recommended(&self) -> Regime {
        if self.heavy.tax < self.light.tax {
            Regime::Heavy
        } else {
            Regime::Light
        }
    }

    /// Tax saved by picking the recommended regime over the other one.
    pub fn savings(&self) -> Decimal {
        (self.heavy.tax - self.light.tax).abs()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn comparison(
        heavy_tax: Decimal,
        light_tax: Decimal,
    ) -> RegimeComparison {
        RegimeComparison {
            heavy: RegimeResult {
                taxable_income: dec!(772600.00),
                tax: heavy_tax,
            },
            light: RegimeResult {
                taxable_income: dec!(1150000.00),
                tax: light_tax,
            },
        }
    }

    #[test]
    fn recommended_picks_lower_tax() {
        assert_eq!(comparison(dec!(69700.80), dec!(85800.00)).recommended(), Regime::Heavy);
        assert_eq!(comparison(dec!(90000.00), dec!(85800.00)).recommended(), Regime::Light);
    }

    #[test]
    fn recommended_prefers_light_on_tie() {
        assert_eq!(comparison(dec!(0.00), dec!(0.00)).recommended(), Regime::Light);
    }

    #[test]
    fn savings_is_absolute_difference() {
        assert_eq!(comparison(dec!(69700.80), dec!(85800.00)).savings(), dec!(16099.20));
    }

    #[test]
    fn result_selects_regime() {
        let c = comparison(dec!(1.00), dec!(2.00));

        assert_eq!(c.result(Regime::Heavy).tax, dec!(1.00));
        assert_eq!(c.result(Regime::Light).tax, dec!(2.00));
    }

    #[test]
    fn serializes_to_heavy_light_shape() {
        let value = serde_json::to_value(comparison(dec!(69700.80), dec!(85800.00))).unwrap();

        assert_eq!(
            value,
            json!({
                "heavy": {"taxable_income": "772600.00", "tax": "69700.80"},
                "light": {"taxable_income": "1150000.00", "tax": "85800.00"}
            })
        );
    }
}
