use crate::error::{DrillError, Result};
use crate::normalize::round2;

/// A VAT rate in [0, 1]. Constructed once from configuration and handed to
/// [`vat`]; there is no process-wide rate to mutate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(f64);

impl TaxRate {
    pub const DEFAULT: f64 = 0.19;

    pub fn new(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(DrillError::Validation(
                "tax rate must be within [0, 1]".into(),
            ));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        round2(self.0 * 100.0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

pub fn vat(base_price: f64, rate: TaxRate) -> Result<f64> {
    if !base_price.is_finite() {
        return Err(DrillError::Type("base price: not numeric".into()));
    }
    if base_price < 0.0 {
        return Err(DrillError::Validation("base price: negative value".into()));
    }
    Ok(round2(base_price * rate.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_nineteen_percent() {
        assert_eq!(vat(100.0, TaxRate::default()).unwrap(), 19.0);
    }

    #[test]
    fn explicit_rates_do_not_leak_between_calls() {
        let ten = TaxRate::new(0.1).unwrap();
        let twenty_one = TaxRate::new(0.21).unwrap();
        assert_eq!(vat(250.0, ten).unwrap(), 25.0);
        assert_eq!(vat(250.0, twenty_one).unwrap(), 52.5);
        assert_eq!(vat(250.0, ten).unwrap(), 25.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(vat(19999.99, TaxRate::default()).unwrap(), 3800.0);
    }

    #[test]
    fn validates_inputs() {
        assert!(vat(-1.0, TaxRate::default()).is_err());
        assert!(TaxRate::new(-0.1).is_err());
        assert!(TaxRate::new(1.5).is_err());
        assert!(TaxRate::new(f64::NAN).is_err());
    }
}
