//! Standalone calculations with no persistence.
//!
//! Each drill is a pure function (or, for [`counter`], a tiny owned-state
//! object). Tunables such as the VAT rate are arguments; the CLI reads their
//! defaults from [`crate::config::DrillConfig`].

pub mod bmi;
pub mod counter;
pub mod explore;
pub mod folds;
pub mod grades;
pub mod pricing;
pub mod profile;
pub mod tax;
pub mod words;

use crate::error::{DrillError, Result};
use crate::normalize::{collapse_whitespace, parse_decimal};

/// Parses a `label:number` token as typed on the command line, e.g.
/// `Shirt:50000` or `Ana:4,5`. Malformed tokens are rejected, never skipped.
pub fn parse_labeled(token: &str) -> Result<(String, f64)> {
    let malformed = || {
        DrillError::Validation(format!(
            "malformed entry '{}', expected name:number",
            token
        ))
    };
    let (label, number) = token.rsplit_once(':').ok_or_else(malformed)?;
    let label = collapse_whitespace(label);
    if label.is_empty() {
        return Err(malformed());
    }
    let value = parse_decimal(number).ok_or_else(malformed)?;
    Ok((label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_with_comma_decimals() {
        assert_eq!(parse_labeled("Ana:4,5").unwrap(), ("Ana".to_string(), 4.5));
        assert_eq!(
            parse_labeled(" Blue  Shirt : 100 ").unwrap(),
            ("Blue Shirt".to_string(), 100.0)
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        for bad in ["Ana", "Ana:", ":4", "Ana:four"] {
            assert!(matches!(parse_labeled(bad), Err(DrillError::Validation(_))), "{bad}");
        }
    }
}
