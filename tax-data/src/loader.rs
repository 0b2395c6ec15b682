use std::io::Read;

use serde::Deserialize;
use serde_json::Value;
use tax_core::{FinancialsRepository, NewFinancialRecord, RawFinancials, RepositoryError};
use thiserror::Error;

/// Errors that can occur when importing salary records.
#[derive(Debug, Error)]
pub enum FinancialsLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("CSV has no recognised columns; expected any of: {0}")]
    NoKnownColumns(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for FinancialsLoaderError {
    fn from(err: csv::Error) -> Self {
        FinancialsLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the import CSV.
///
/// Columns are matched by header name and may appear in any order. Any
/// subset is accepted; missing columns and empty cells are absent. Cells are
/// kept as text so the engine's own amount parsing applies (`"1,20,000"`
/// and `"1.2e5"` both work).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FinancialsCsvRow {
    gross_salary: Option<String>,
    basic_salary: Option<String>,
    hra_received: Option<String>,
    rent_paid: Option<String>,
    deduction_80c: Option<String>,
    deduction_80d: Option<String>,
    standard_deduction: Option<String>,
    professional_tax: Option<String>,
    tds: Option<String>,
}

impl From<FinancialsCsvRow> for RawFinancials {
    fn from(row: FinancialsCsvRow) -> Self {
        RawFinancials {
            gross_salary: row.gross_salary.map(Value::String),
            basic_salary: row.basic_salary.map(Value::String),
            hra_received: row.hra_received.map(Value::String),
            rent_paid: row.rent_paid.map(Value::String),
            deduction_80c: row.deduction_80c.map(Value::String),
            deduction_80d: row.deduction_80d.map(Value::String),
            standard_deduction: row.standard_deduction.map(Value::String),
            professional_tax: row.professional_tax.map(Value::String),
            tds: row.tds.map(Value::String),
        }
    }
}

/// Bulk import of salary records from CSV.
///
/// Parsing and storing are separate steps so the parsed rows can be
/// inspected (or compared) before anything touches the database.
pub struct FinancialsCsvLoader;

impl FinancialsCsvLoader {
    /// Parse salary records from a CSV reader.
    ///
    /// Rows with no usable value are skipped with a warning.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RawFinancials>, FinancialsLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers
            .iter()
            .any(|h| tax_core::FinancialField::parse(h).is_some())
        {
            let expected: Vec<_> = tax_core::FinancialField::ALL
                .iter()
                .map(|f| f.as_str())
                .collect();
            return Err(FinancialsLoaderError::NoKnownColumns(expected.join(", ")));
        }

        let mut records = Vec::new();
        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: FinancialsCsvRow = result?;
            let raw = RawFinancials::from(row);
            if raw.is_blank() {
                tracing::warn!(row = index + 1, "skipping blank row");
                continue;
            }
            records.push(raw);
        }

        Ok(records)
    }

    /// Store each record under a fresh session id. Returns how many were saved.
    pub async fn load<R: FinancialsRepository + ?Sized>(
        repo: &R,
        records: &[RawFinancials],
    ) -> Result<usize, FinancialsLoaderError> {
        let mut inserted = 0;

        for raw in records {
            let saved = repo.save_financials(NewFinancialRecord::from_raw(raw)).await?;
            tracing::debug!(session_id = %saved.session_id, "imported record");
            inserted += 1;
        }

        tracing::info!(count = inserted, "import complete");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const HEADER: &str = "gross_salary,basic_salary,hra_received,rent_paid,deduction_80c,deduction_80d,standard_deduction,professional_tax,tds";

    fn string(s: &str) -> Option<Value> {
        Some(json!(s))
    }

    #[test]
    fn test_parse_full_row() {
        let csv = format!("{HEADER}\n1200000,600000,200000,300000,150000,25000,50000,2400,90000");

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            RawFinancials {
                gross_salary: string("1200000"),
                basic_salary: string("600000"),
                hra_received: string("200000"),
                rent_paid: string("300000"),
                deduction_80c: string("150000"),
                deduction_80d: string("25000"),
                standard_deduction: string("50000"),
                professional_tax: string("2400"),
                tds: string("90000"),
            }
        );
    }

    #[test]
    fn test_parse_empty_cells_are_absent() {
        let csv = format!("{HEADER}\n58000,32000,16000,,,,,200,");

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].gross_salary, string("58000"));
        assert_eq!(records[0].rent_paid, None);
        assert_eq!(records[0].tds, None);
    }

    #[test]
    fn test_parse_subset_of_columns_in_any_order() {
        let csv = "professional_tax,gross_salary\n200,58000";

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![RawFinancials {
                gross_salary: string("58000"),
                professional_tax: string("200"),
                ..RawFinancials::default()
            }]
        );
    }

    #[test]
    fn test_parse_keeps_quoted_thousands_separators() {
        let csv = "gross_salary,basic_salary\n\"12,00,000\", 600000 ";

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].gross_salary, string("12,00,000"));
        assert_eq!(records[0].basic_salary, string("600000"));
    }

    #[test]
    fn test_parse_ignores_unknown_columns() {
        let csv = "employee,gross_salary\nasha,58000";

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].gross_salary, string("58000"));
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let csv = "gross_salary,tds\n,\n58000,\n";

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = format!("{HEADER}\n");

        let records = FinancialsCsvLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_rejects_unrecognised_header() {
        let result = FinancialsCsvLoader::parse("salary,rent\n1,2".as_bytes());

        match result {
            Err(FinancialsLoaderError::NoKnownColumns(expected)) => {
                assert!(expected.contains("gross_salary"));
            }
            other => panic!("expected NoKnownColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_ragged_row_is_csv_error() {
        let csv = "gross_salary,tds\n58000,1500,extra";

        let err = FinancialsCsvLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, FinancialsLoaderError::CsvParse(_)));
    }
}
