//! Field extraction from salary-slip text.
//!
//! Turning a PDF or scan into text happens upstream. This module maps that
//! text onto a [`RawFinancials`] record. [`FieldExtractor`] is the seam for
//! smarter extractors (e.g. one backed by a language model).
//! [`JsonFieldExtractor`] reads the structured record such an extractor
//! replies with, and [`RegexFieldExtractor`] is the keyword-based fallback.

use regex::Regex;
use serde_json::Value;

use crate::{FinancialField, RawFinancials};

/// Maps document text to a raw financial record.
pub trait FieldExtractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Extracts whatever fields can be found. Never fails; fields that are
    /// not found are left blank or absent.
    fn extract(
        &self,
        text: &str,
    ) -> RawFinancials;
}

/// Keyword label expected before each field's figure.
fn label_pattern(field: FinancialField) -> &'static str {
    match field {
        FinancialField::GrossSalary => r"gross\s*salary",
        FinancialField::BasicSalary => r"basic\s*salary",
        FinancialField::HraReceived => r"hra\s*received",
        FinancialField::RentPaid => r"rent\s*paid",
        FinancialField::Deduction80c => r"80c",
        FinancialField::Deduction80d => r"80d",
        FinancialField::StandardDeduction => r"standard\s*deduction",
        FinancialField::ProfessionalTax => r"professional\s*tax",
        FinancialField::Tds => r"tds",
    }
}

/// Finds `<label> [:-] <number>` for every field, case-insensitively.
///
/// The first match per field wins; commas are stripped from the figure.
/// Unmatched fields come back as empty strings.
#[derive(Debug, Clone)]
pub struct RegexFieldExtractor {
    patterns: Vec<(FinancialField, Regex)>,
}

impl RegexFieldExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = FinancialField::ALL
            .into_iter()
            .map(|field| {
                let pattern = format!(r"(?i){}\s*[:\-]?\s*([\d,\.]+)", label_pattern(field));
                Regex::new(&pattern).map(|re| (field, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }
}

impl FieldExtractor for RegexFieldExtractor {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn extract(
        &self,
        text: &str,
    ) -> RawFinancials {
        let mut raw = RawFinancials::default();

        for (field, re) in &self.patterns {
            let figure = re
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().replace(',', "").trim().to_string())
                .unwrap_or_default();
            raw.set(*field, Value::String(figure));
        }

        raw
    }
}

/// Reads a JSON salary record embedded in text, such as the saved reply of
/// a model-backed extractor.
///
/// The outermost `{...}` span is parsed; prose around it is ignored. Text
/// without a parsable object yields a blank record.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFieldExtractor;

impl FieldExtractor for JsonFieldExtractor {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extract(
        &self,
        text: &str,
    ) -> RawFinancials {
        let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
            return RawFinancials::default();
        };
        if end < start {
            return RawFinancials::default();
        }

        serde_json::from_str(&text[start..=end]).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "no JSON salary record in text");
            RawFinancials::default()
        })
    }
}

/// Runs `primary`, falling back to `fallback` when it finds nothing at all.
pub fn extract_with_fallback(
    primary: &dyn FieldExtractor,
    fallback: &dyn FieldExtractor,
    text: &str,
) -> RawFinancials {
    let fields = primary.extract(text);
    if !fields.is_blank() {
        return fields;
    }

    tracing::info!(
        primary = primary.name(),
        fallback = fallback.name(),
        "primary extractor found no fields, using fallback"
    );
    fallback.extract(text)
}
