mod financial_inputs;
mod financial_record;
mod regime;
mod tax_bracket;

pub use financial_inputs::{FinancialField, FinancialInputs, RawFinancials};
pub use financial_record::{FinancialRecord, NewFinancialRecord};
pub use regime::{Regime, RegimeComparison, RegimeResult};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
