use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::normalize::parse_optional_amount;
use crate::models::{FinancialInputs, RawFinancials};

/// A submitted salary record as persisted (one row of `user_financials`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub session_id: Uuid,

    pub gross_salary: Option<Decimal>,
    pub basic_salary: Option<Decimal>,
    pub hra_received: Option<Decimal>,
    pub rent_paid: Option<Decimal>,
    pub deduction_80c: Option<Decimal>,
    pub deduction_80d: Option<Decimal>,
    pub standard_deduction: Option<Decimal>,
    pub professional_tax: Option<Decimal>,
    pub tds: Option<Decimal>,

    pub created_at: DateTime<Utc>,
}

impl FinancialRecord {
    /// Engine inputs for this record; NULL columns count as zero.
    pub fn inputs(&self) -> FinancialInputs {
        let amount = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
        FinancialInputs {
            gross_salary: amount(self.gross_salary),
            basic_salary: amount(self.basic_salary),
            hra_received: amount(self.hra_received),
            rent_paid: amount(self.rent_paid),
            deduction_80c: amount(self.deduction_80c),
            deduction_80d: amount(self.deduction_80d),
            professional_tax: amount(self.professional_tax),
            tds: amount(self.tds),
        }
    }
}

/// For saving new records (no session id or timestamp)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFinancialRecord {
    pub gross_salary: Option<Decimal>,
    pub basic_salary: Option<Decimal>,
    pub hra_received: Option<Decimal>,
    pub rent_paid: Option<Decimal>,
    pub deduction_80c: Option<Decimal>,
    pub deduction_80d: Option<Decimal>,
    pub standard_deduction: Option<Decimal>,
    pub professional_tax: Option<Decimal>,
    pub tds: Option<Decimal>,
}

impl NewFinancialRecord {
    /// Blank or unparsable raw values are stored as NULL.
    pub fn from_raw(raw: &RawFinancials) -> Self {
        Self {
            gross_salary: parse_optional_amount(raw.gross_salary.as_ref()),
            basic_salary: parse_optional_amount(raw.basic_salary.as_ref()),
            hra_received: parse_optional_amount(raw.hra_received.as_ref()),
            rent_paid: parse_optional_amount(raw.rent_paid.as_ref()),
            deduction_80c: parse_optional_amount(raw.deduction_80c.as_ref()),
            deduction_80d: parse_optional_amount(raw.deduction_80d.as_ref()),
            standard_deduction: parse_optional_amount(raw.standard_deduction.as_ref()),
            professional_tax: parse_optional_amount(raw.professional_tax.as_ref()),
            tds: parse_optional_amount(raw.tds.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn from_raw_maps_blank_and_garbage_to_none() {
        let raw: RawFinancials = serde_json::from_value(json!({
            "gross_salary": "58000",
            "basic_salary": 32000,
            "hra_received": "",
            "rent_paid": "n/a",
            "professional_tax": "200"
        }))
        .unwrap();

        let record = NewFinancialRecord::from_raw(&raw);

        assert_eq!(
            record,
            NewFinancialRecord {
                gross_salary: Some(dec!(58000)),
                basic_salary: Some(dec!(32000)),
                professional_tax: Some(dec!(200)),
                ..Default::default()
            }
        );
    }

    #[test]
    fn inputs_treats_null_columns_as_zero() {
        let record = FinancialRecord {
            session_id: Uuid::nil(),
            gross_salary: Some(dec!(58000)),
            basic_salary: Some(dec!(32000)),
            hra_received: Some(dec!(16000)),
            rent_paid: None,
            deduction_80c: None,
            deduction_80d: None,
            standard_deduction: None,
            professional_tax: Some(dec!(200)),
            tds: Some(dec!(1500)),
            created_at: Utc::now(),
        };

        let inputs = record.inputs();

        assert_eq!(inputs.gross_salary, dec!(58000));
        assert_eq!(inputs.rent_paid, Decimal::ZERO);
        assert_eq!(inputs.professional_tax, dec!(200));
        assert_eq!(inputs.tds, dec!(1500));
    }
}
