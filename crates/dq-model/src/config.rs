//! Validation settings.
//!
//! Loaded from an optional TOML file; any key left out falls back to the
//! defaults below.
//!
//! ```toml
//! expected_currency = "INR"
//! expected_ship_country = "IN"
//! date_format = "%m-%d-%y"
//! allowed_statuses = ["Delivered", "Shipped", "Processing", "Cancelled"]
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_SHIP_COUNTRY: &str = "IN";
/// Month-day-two-digit-year, e.g. `04-30-22`.
pub const DEFAULT_DATE_FORMAT: &str = "%m-%d-%y";
pub const DEFAULT_ALLOWED_STATUSES: &[&str] = &["Delivered", "Shipped", "Processing", "Cancelled"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub expected_currency: String,
    pub expected_ship_country: String,
    /// chrono `strftime` format every `order_date` must parse with.
    pub date_format: String,
    pub allowed_statuses: BTreeSet<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_currency: DEFAULT_CURRENCY.to_string(),
            expected_ship_country: DEFAULT_SHIP_COUNTRY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            allowed_statuses: DEFAULT_ALLOWED_STATUSES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl ValidationConfig {
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.expected_currency = currency.into();
        self
    }

    #[must_use]
    pub fn with_ship_country(mut self, country: impl Into<String>) -> Self {
        self.expected_ship_country = country.into();
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_allowed_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    /// Reject settings the validators cannot apply meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expected_currency.trim().is_empty() {
            return Err(ConfigError::Empty {
                setting: "expected_currency",
            });
        }
        if self.expected_ship_country.trim().is_empty() {
            return Err(ConfigError::Empty {
                setting: "expected_ship_country",
            });
        }
        if self.allowed_statuses.is_empty() {
            return Err(ConfigError::Empty {
                setting: "allowed_statuses",
            });
        }
        let format = self.date_format.trim();
        if format.is_empty() {
            return Err(ConfigError::Empty {
                setting: "date_format",
            });
        }
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat {
                format: self.date_format.clone(),
            });
        }
        Ok(())
    }
}

/// Load and validate a TOML configuration file.
pub fn load_config(path: &Path) -> Result<ValidationConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ValidationConfig = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
