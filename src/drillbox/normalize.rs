//! Coercion helpers shared by every record type.
//!
//! Records arrive as loosely-typed JSON (`serde_json::Value`) either from disk or
//! from the CLI. These helpers turn individual fields into canonical values or
//! fail with [`DrillError::Validation`] (semantic problem) or
//! [`DrillError::Type`] (wrong shape).

use crate::error::{DrillError, Result};
use serde_json::{Map, Value};

/// Collapses internal whitespace runs (including newlines) to a single space
/// and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a text field, rejecting values that are empty once collapsed.
pub fn text(field: &str, value: &str) -> Result<String> {
    let clean = collapse_whitespace(value);
    if clean.is_empty() {
        return Err(DrillError::Validation(format!("{}: empty field", field)));
    }
    Ok(clean)
}

/// Case-insensitive identifier comparison on normalized text.
pub fn same_key(a: &str, b: &str) -> bool {
    collapse_whitespace(a).to_lowercase() == collapse_whitespace(b).to_lowercase()
}

pub fn as_object<'a>(kind: &str, raw: &'a Value) -> Result<&'a Map<String, Value>> {
    raw.as_object()
        .ok_or_else(|| DrillError::Type(format!("each {} must be an object", kind)))
}

pub fn required<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    map.get(key)
        .ok_or_else(|| DrillError::Type(format!("missing key '{}'", key)))
}

/// Reads a required text field. Scalars are stringified first, so `{"id": 7}`
/// yields `"7"`; containers and null are rejected.
pub fn text_field(map: &Map<String, Value>, key: &str) -> Result<String> {
    match required(map, key)? {
        Value::String(s) => text(key, s),
        Value::Number(n) => text(key, &n.to_string()),
        Value::Bool(b) => text(key, &b.to_string()),
        _ => Err(DrillError::Type(format!("{}: expected text", key))),
    }
}

/// Reads an optional text field: `null` means absent, anything else must
/// normalize to non-empty text.
pub fn optional_text_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match required(map, key)? {
        Value::Null => Ok(None),
        Value::String(s) => text(key, s).map(Some),
        Value::Number(n) => text(key, &n.to_string()).map(Some),
        _ => Err(DrillError::Type(format!("{}: expected text or null", key))),
    }
}

/// Float coercion. Numeric strings may use `,` as the decimal separator.
pub fn to_f64(field: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DrillError::Type(format!("{}: not numeric", field))),
    }
}

/// Integer coercion. Floats truncate toward zero; numeric strings must be
/// integral.
pub fn to_i64(field: &str, value: &Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| DrillError::Type(format!("{}: not numeric", field)))
}

pub fn non_negative_f64(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(DrillError::Type(format!("{}: not numeric", field)));
    }
    if value < 0.0 {
        return Err(DrillError::Validation(format!("{}: negative value", field)));
    }
    Ok(value)
}

pub fn non_negative_i64(field: &str, value: i64) -> Result<i64> {
    if value < 0 {
        return Err(DrillError::Validation(format!("{}: negative value", field)));
    }
    Ok(value)
}

/// Parses user-typed decimals, accepting `,` as the decimal separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value = text.trim().replace(',', ".");
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collapses_inner_runs_and_trims() {
        assert_eq!(collapse_whitespace("  Blue \t  shirt\n size  M "), "Blue shirt size M");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn empty_text_is_a_validation_error() {
        let err = text("name", " \n ").unwrap_err();
        assert!(matches!(err, DrillError::Validation(m) if m == "name: empty field"));
    }

    #[test]
    fn keys_compare_case_insensitively_after_normalizing() {
        assert!(same_key("Blue  Shirt", "blue shirt"));
        assert!(!same_key("Blue Shirt", "blue shirts"));
    }

    #[test]
    fn numeric_coercion_accepts_numbers_and_numeric_strings() {
        assert_eq!(to_f64("price", &json!(12.5)).unwrap(), 12.5);
        assert_eq!(to_f64("price", &json!(" 7 ")).unwrap(), 7.0);
        assert_eq!(to_i64("stock", &json!(4)).unwrap(), 4);
        assert_eq!(to_i64("stock", &json!(4.9)).unwrap(), 4);
        assert_eq!(to_i64("stock", &json!("12")).unwrap(), 12);
    }

    #[test]
    fn non_numeric_values_are_type_errors() {
        for bad in [json!("abc"), json!(null), json!([1]), json!(true), json!("1.5")] {
            assert!(matches!(to_i64("stock", &bad), Err(DrillError::Type(_))));
        }
        assert!(matches!(to_f64("price", &json!("NaN")), Err(DrillError::Type(_))));
    }

    #[test]
    fn negatives_are_rejected() {
        assert!(matches!(
            non_negative_f64("price", -0.01),
            Err(DrillError::Validation(m)) if m == "price: negative value"
        ));
        assert!(non_negative_i64("stock", 0).is_ok());
    }

    #[test]
    fn text_fields_stringify_scalars() {
        let raw = json!({"id": 7, "flag": true, "gone": null});
        let map = raw.as_object().unwrap();
        assert_eq!(text_field(map, "id").unwrap(), "7");
        assert_eq!(text_field(map, "flag").unwrap(), "true");
        assert!(matches!(text_field(map, "gone"), Err(DrillError::Type(_))));
        assert!(matches!(text_field(map, "missing"), Err(DrillError::Type(_))));
        assert_eq!(optional_text_field(map, "gone").unwrap(), None);
    }

    #[test]
    fn decimals_accept_comma_separator() {
        assert_eq!(parse_decimal("3,5"), Some(3.5));
        assert_eq!(parse_decimal(" 22.5 "), Some(22.5));
        assert_eq!(parse_decimal("x"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(21.254), 21.25);
        assert_eq!(round2(3.0), 3.0);
    }
}
