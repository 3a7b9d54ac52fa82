use crate::drills::tax::TaxRate;
use crate::error::{DrillError, Result};
use crate::normalize::parse_decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["tax-rate", "discount", "passing-grade", "min-word-length"];

/// Drill defaults, stored in `<data>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrillConfig {
    /// VAT rate applied by the `vat` drill, in [0, 1]
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Fraction taken off by the `discount` drill, in [0, 1]
    #[serde(default = "default_discount")]
    pub discount: f64,

    /// Minimum passing grade on the 0–5 scale
    #[serde(default = "default_passing_grade")]
    pub passing_grade: f64,

    /// Words must be strictly longer than this to be picked by `words`
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
}

fn default_tax_rate() -> f64 {
    TaxRate::DEFAULT
}

fn default_discount() -> f64 {
    0.10
}

fn default_passing_grade() -> f64 {
    3.0
}

fn default_min_word_length() -> usize {
    5
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            discount: default_discount(),
            passing_grade: default_passing_grade(),
            min_word_length: default_min_word_length(),
        }
    }
}

impl DrillConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DrillError::Io)?;
        let config: DrillConfig =
            serde_json::from_str(&content).map_err(DrillError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DrillError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DrillError::Serialization)?;
        fs::write(config_path, content).map_err(DrillError::Io)?;
        Ok(())
    }

    pub fn tax_rate(&self) -> Result<TaxRate> {
        TaxRate::new(self.tax_rate)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "tax-rate" => Some(self.tax_rate.to_string()),
            "discount" => Some(self.discount.to_string()),
            "passing-grade" => Some(self.passing_grade.to_string()),
            "min-word-length" => Some(self.min_word_length.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tax-rate" => {
                self.tax_rate = TaxRate::new(fraction(key, value)?)?.value();
            }
            "discount" => {
                self.discount = fraction(key, value)?;
            }
            "passing-grade" => {
                let grade = number(key, value)?;
                if !(0.0..=5.0).contains(&grade) {
                    return Err(DrillError::Config(format!(
                        "{} must be between 0 and 5",
                        key
                    )));
                }
                self.passing_grade = grade;
            }
            "min-word-length" => {
                self.min_word_length = value.trim().parse().map_err(|_| {
                    DrillError::Config(format!("{} must be a whole number", key))
                })?;
            }
            other => return Err(DrillError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}

fn number(key: &str, value: &str) -> Result<f64> {
    parse_decimal(value).ok_or_else(|| DrillError::Config(format!("{} must be a number", key)))
}

fn fraction(key: &str, value: &str) -> Result<f64> {
    let v = number(key, value)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(DrillError::Config(format!("{} must be between 0 and 1", key)));
    }
    Ok(v)
}
