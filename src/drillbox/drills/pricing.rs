use crate::error::{DrillError, Result};
use crate::normalize::round2;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTag {
    pub name: String,
    pub price: f64,
}

impl PriceTag {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Parses a `name:price` token.
    pub fn parse(token: &str) -> Result<Self> {
        let (name, price) = super::parse_labeled(token)?;
        Ok(Self::new(name, price))
    }
}

/// Applies `discount` (a fraction in [0, 1]) to every price, keeping order.
pub fn discounted_prices(tags: &[PriceTag], discount: f64) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&discount) {
        return Err(DrillError::Validation(
            "discount must be within [0, 1]".into(),
        ));
    }
    if let Some(bad) = tags.iter().find(|t| !t.price.is_finite() || t.price < 0.0) {
        return Err(DrillError::Type(format!("{}: price must be a non-negative number", bad.name)));
    }
    let factor = 1.0 - discount;
    Ok(tags.iter().map(|t| round2(t.price * factor)).collect())
}
