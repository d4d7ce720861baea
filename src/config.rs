// Engine configuration. The tax rate is injected here instead of being hard-coded
// at call sites; in deployments it comes from the property's settings record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TAX_RATE: f64 = 0.18;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tax rate must be a fraction in [0, 1), got {0}")]
    InvalidTaxRate(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fraction multiplied against the subtotal to produce the tax amount.
    pub tax_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl EngineConfig {
    pub fn new(tax_rate: f64) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&tax_rate) || !tax_rate.is_finite() {
            return Err(ConfigError::InvalidTaxRate(tax_rate));
        }
        Ok(Self { tax_rate })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(settings.tax_percentage / 100.0)
    }
}

/// Property-wide settings record as stored by the backend. Tax is persisted as a
/// percentage there (18.0), while the engine works with fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub property_name: String,
    pub contact_number: String,
    pub email: String,
    pub address: Option<String>,
    pub tax_percentage: f64,
}
