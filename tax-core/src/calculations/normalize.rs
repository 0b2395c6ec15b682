//! Permissive coercion of raw field values into amounts.
//!
//! Upstream extraction is unreliable, so nothing here fails: a value that
//! cannot be read as a number counts as zero for the engine, or as absent
//! for persistence.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses text such as `"1,234.56"`, `" 58000 "` or `"1.2e5"`.
///
/// Returns `None` for blank or non-numeric input.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Reads a JSON value as an amount, keeping its sign.
///
/// Numbers and numeric strings parse; everything else (null, booleans,
/// arrays, objects, blank or garbage text) is `None`.
pub fn parse_optional_amount(raw: Option<&Value>) -> Option<Decimal> {
    match raw? {
        Value::Number(n) => parse_amount(&n.to_string()),
        Value::String(s) => {
            let parsed = parse_amount(s);
            if parsed.is_none() && !s.trim().is_empty() {
                tracing::warn!(input = %s, "unparsable amount");
            }
            parsed
        }
        _ => None,
    }
}

/// Coerces a raw field value into a definite, non-negative amount.
///
/// Absent or unparsable values yield zero and negative numbers are clamped
/// to zero. Never fails.
pub fn normalize(raw: Option<&Value>) -> Decimal {
    parse_optional_amount(raw)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_amount("12,00,000"), Some(dec!(1200000)));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  "), Some(dec!(123.45)));
    }

    #[test]
    fn parse_amount_accepts_scientific_notation() {
        assert_eq!(parse_amount("1.2e5"), Some(dec!(120000)));
    }

    #[test]
    fn parse_amount_rejects_blank_and_text() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("Rs. 500"), None);
    }

    #[test]
    fn normalize_reads_numbers_and_numeric_strings() {
        assert_eq!(normalize(Some(&json!(58000))), dec!(58000));
        assert_eq!(normalize(Some(&json!(2400.5))), dec!(2400.5));
        assert_eq!(normalize(Some(&json!("32000"))), dec!(32000));
    }

    #[test]
    fn normalize_absent_value_is_zero() {
        assert_eq!(normalize(None), Decimal::ZERO);
        assert_eq!(normalize(Some(&Value::Null)), Decimal::ZERO);
    }

    #[test]
    fn normalize_non_numeric_value_is_zero() {
        assert_eq!(normalize(Some(&json!(""))), Decimal::ZERO);
        assert_eq!(normalize(Some(&json!("sixteen thousand"))), Decimal::ZERO);
        assert_eq!(normalize(Some(&json!(true))), Decimal::ZERO);
        assert_eq!(normalize(Some(&json!([1, 2]))), Decimal::ZERO);
        assert_eq!(normalize(Some(&json!({"amount": 5}))), Decimal::ZERO);
    }

    #[test]
    fn normalize_clamps_negative_amounts() {
        assert_eq!(normalize(Some(&json!(-500))), Decimal::ZERO);
        assert_eq!(normalize(Some(&json!("-1,000"))), Decimal::ZERO);
    }

    #[test]
    fn parse_optional_amount_keeps_sign() {
        assert_eq!(parse_optional_amount(Some(&json!("-100"))), Some(dec!(-100)));
    }
}
