use crate::error::{DrillError, Result};
use crate::normalize::round2;
use serde::Serialize;

const UNDERWEIGHT_MAX: f64 = 18.5;
const NORMAL_MAX: f64 = 25.0;
const OVERWEIGHT_MAX: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        };
        f.write_str(label)
    }
}

/// Body mass index: weight (kg) over height (m) squared, rounded to 2 decimals.
pub fn calculate(weight_kg: f64, height_m: f64) -> Result<f64> {
    if !(weight_kg > 0.0) {
        return Err(DrillError::Validation("weight must be greater than 0".into()));
    }
    if !(height_m > 0.0) {
        return Err(DrillError::Validation("height must be greater than 0".into()));
    }
    Ok(round2(weight_kg / (height_m * height_m)))
}

pub fn classify(bmi: f64) -> Result<BmiCategory> {
    if !(bmi > 0.0) {
        return Err(DrillError::Validation("bmi must be greater than 0".into()));
    }
    Ok(if bmi < UNDERWEIGHT_MAX {
        BmiCategory::Underweight
    } else if bmi < NORMAL_MAX {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_MAX {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_rounded_bmi() {
        assert_eq!(calculate(70.0, 1.75).unwrap(), 22.86);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(calculate(0.0, 1.7).is_err());
        assert!(calculate(70.0, -1.0).is_err());
        assert!(calculate(f64::NAN, 1.7).is_err());
        assert!(classify(0.0).is_err());
    }

    #[test]
    fn category_boundaries_are_half_open() {
        assert_eq!(classify(18.49).unwrap(), BmiCategory::Underweight);
        assert_eq!(classify(18.5).unwrap(), BmiCategory::Normal);
        assert_eq!(classify(25.0).unwrap(), BmiCategory::Overweight);
        assert_eq!(classify(30.0).unwrap(), BmiCategory::Obese);
    }
}
