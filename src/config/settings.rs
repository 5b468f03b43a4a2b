//! User settings for the budget tracker
//!
//! Holds display preferences and the monthly rollover policy. Every field
//! has a default so older or partial config files still load.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// What happens to the ledger when a new calendar month starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// Keep all history across months
    #[default]
    Disabled,
    /// Delete every transaction when the month changes (no archive)
    ClearOnNewMonth,
}

impl RolloverPolicy {
    pub fn clears_history(&self) -> bool {
        matches!(self, Self::ClearOnNewMonth)
    }
}

impl std::str::FromStr for RolloverPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "disabled" | "off" => Ok(Self::Disabled),
            "clear_on_new_month" | "clear" => Ok(Self::ClearOnNewMonth),
            other => Err(format!(
                "unknown rollover policy '{}' (expected disabled or clear-on-new-month)",
                other
            )),
        }
    }
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Prefix used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub rollover_policy: RolloverPolicy,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Ksh. ".to_string()
}

/// Date format used when none is configured or the configured one is invalid
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Check that chrono understands every specifier in a strftime format
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            rollover_policy: RolloverPolicy::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if !is_valid_date_format(&settings.date_format) {
                warn!(
                    date_format = %settings.date_format,
                    "invalid date format in settings; using {}",
                    DEFAULT_DATE_FORMAT
                );
                settings.date_format = default_date_format();
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
