//! Calculator settings read from a TOML file.
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! currency = "€"
//!
//! [rates]
//! permanent = "0.25"
//! freelance = "0.30"
//!
//! [bounds]
//! year_min = 1900
//! year_max = 2100
//! max_hours_per_day = 24
//! max_days_per_year = 356
//! max_amount = "1000000000"
//! default_year = 1900
//! ```

use std::path::{Path, PathBuf};

use income_core::calculations::{TaxRates, TaxRatesError};
use income_core::validation::ValidationBounds;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Rates(#[from] TaxRatesError),

    #[error("invalid bounds: {0}")]
    Bounds(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Suffix appended to every displayed amount.
    pub currency: String,
    pub rates: TaxRates,
    pub bounds: ValidationBounds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: "€".to_string(),
            rates: TaxRates::default(),
            bounds: ValidationBounds::default(),
        }
    }
}

impl AppConfig {
    /// Parses and checks a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    ///
    /// Rejects rates outside `[0, 1]`, an inverted year range and negative
    /// ceilings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rates.validate()?;

        let bounds = &self.bounds;
        if bounds.year_min > bounds.year_max {
            return Err(ConfigError::Bounds(format!(
                "year_min {} is after year_max {}",
                bounds.year_min, bounds.year_max
            )));
        }
        if bounds.max_hours_per_day < 0 {
            return Err(ConfigError::Bounds(format!(
                "max_hours_per_day must not be negative, got {}",
                bounds.max_hours_per_day
            )));
        }
        if bounds.max_days_per_year < 0 {
            return Err(ConfigError::Bounds(format!(
                "max_days_per_year must not be negative, got {}",
                bounds.max_days_per_year
            )));
        }
        if bounds.max_amount.is_sign_negative() {
            return Err(ConfigError::Bounds(format!(
                "max_amount must not be negative, got {}",
                bounds.max_amount
            )));
        }
        Ok(())
    }
}
