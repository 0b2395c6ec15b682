use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculations::normalize::normalize;

/// Named fields of a salary record as produced by upstream extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialField {
    GrossSalary,
    BasicSalary,
    HraReceived,
    RentPaid,
    Deduction80c,
    Deduction80d,
    StandardDeduction,
    ProfessionalTax,
    Tds,
}

impl FinancialField {
    pub const ALL: [FinancialField; 9] = [
        Self::GrossSalary,
        Self::BasicSalary,
        Self::HraReceived,
        Self::RentPaid,
        Self::Deduction80c,
        Self::Deduction80d,
        Self::StandardDeduction,
        Self::ProfessionalTax,
        Self::Tds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrossSalary => "gross_salary",
            Self::BasicSalary => "basic_salary",
            Self::HraReceived => "hra_received",
            Self::RentPaid => "rent_paid",
            Self::Deduction80c => "deduction_80c",
            Self::Deduction80d => "deduction_80d",
            Self::StandardDeduction => "standard_deduction",
            Self::ProfessionalTax => "professional_tax",
            Self::Tds => "tds",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }
}

/// Loosely-typed record as it arrives from extraction or a request body.
///
/// Every field is optional and may hold any JSON value: a number, a numeric
/// string, an empty string or garbage. Nothing is validated here; the
/// engine coerces values when it builds [`FinancialInputs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFinancials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_salary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_salary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hra_received: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_paid: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction_80c: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction_80d: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_deduction: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_tax: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tds: Option<Value>,
}

impl RawFinancials {
    pub fn get(
        &self,
        field: FinancialField,
    ) -> Option<&Value> {
        match field {
            FinancialField::GrossSalary => self.gross_salary.as_ref(),
            FinancialField::BasicSalary => self.basic_salary.as_ref(),
            FinancialField::HraReceived => self.hra_received.as_ref(),
            FinancialField::RentPaid => self.rent_paid.as_ref(),
            FinancialField::Deduction80c => self.deduction_80c.as_ref(),
            FinancialField::Deduction80d => self.deduction_80d.as_ref(),
            FinancialField::StandardDeduction => self.standard_deduction.as_ref(),
            FinancialField::ProfessionalTax => self.professional_tax.as_ref(),
            FinancialField::Tds => self.tds.as_ref(),
        }
    }

    pub fn set(
        &mut self,
        field: FinancialField,
        value: Value,
    ) {
        let slot = match field {
            FinancialField::GrossSalary => &mut self.gross_salary,
            FinancialField::BasicSalary => &mut self.basic_salary,
            FinancialField::HraReceived => &mut self.hra_received,
            FinancialField::RentPaid => &mut self.rent_paid,
            FinancialField::Deduction80c => &mut self.deduction_80c,
            FinancialField::Deduction80d => &mut self.deduction_80d,
            FinancialField::StandardDeduction => &mut self.standard_deduction,
            FinancialField::ProfessionalTax => &mut self.professional_tax,
            FinancialField::Tds => &mut self.tds,
        };
        *slot = Some(value);
    }

    /// True when no field carries a usable value (absent, `null` or blank text).
    pub fn is_blank(&self) -> bool {
        FinancialField::ALL
            .iter()
            .all(|field| match self.get(*field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
    }
}

/// Normalized figures the tax engine works from.
///
/// Every amount is a definite, non-negative decimal. `tds` is carried for
/// display only and never enters a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub gross_salary: Decimal,
    pub basic_salary: Decimal,
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub deduction_80c: Decimal,
    pub deduction_80d: Decimal,
    pub professional_tax: Decimal,
    pub tds: Decimal,
}

impl FinancialInputs {
    /// Coerces every raw field; missing or unparsable values become zero.
    pub fn from_raw(raw: &RawFinancials) -> Self {
        Self {
            gross_salary: normalize(raw.gross_salary.as_ref()),
            basic_salary: normalize(raw.basic_salary.as_ref()),
            hra_received: normalize(raw.hra_received.as_ref()),
            rent_paid: normalize(raw.rent_paid.as_ref()),
            deduction_80c: normalize(raw.deduction_80c.as_ref()),
            deduction_80d: normalize(raw.deduction_80d.as_ref()),
            professional_tax: normalize(raw.professional_tax.as_ref()),
            tds: normalize(raw.tds.as_ref()),
        }
    }
}

impl From<&RawFinancials> for FinancialInputs {
    fn from(raw: &RawFinancials) -> Self {
        Self::from_raw(raw)
    }
}
