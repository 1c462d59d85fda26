//! User settings, read from `settings.json` in the platform config directory.
//!
//! Every field has a default, so a missing file or a partial file is fine.
//! Settings are never written back.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::store::DEFAULT_MONTHLY_BUDGET;

pub(crate) const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Starting monthly budget for the optimizer.
    pub(crate) monthly_budget: Decimal,
    pub(crate) dark_mode: bool,
    pub(crate) currency_symbol: String,
    /// `tracing` filter directive, overridden by `BILLTRACK_LOG`.
    pub(crate) log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monthly_budget: DEFAULT_MONTHLY_BUDGET,
            dark_mode: true,
            currency_symbol: "₹".into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;
        if settings.monthly_budget < Decimal::ZERO {
            anyhow::bail!("monthly_budget must not be negative in {}", path.display());
        }
        Ok(settings)
    }
}

/// Platform directories used by billtrack.
pub(crate) struct AppDirs {
    pub(crate) config_dir: PathBuf,
    pub(crate) data_dir: PathBuf,
}

impl AppDirs {
    pub(crate) fn locate() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "billtrack", "Billtrack")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self {
            config_dir: proj_dirs.config_dir().to_path_buf(),
            data_dir: proj_dirs.data_dir().to_path_buf(),
        })
    }

    pub(crate) fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Create the data directory and return the log file path inside it.
    pub(crate) fn log_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        Ok(self.data_dir.join("billtrack.log"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn write_settings(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), contents).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.monthly_budget, dec!(50000));
        assert!(settings.dark_mode);
    }

    #[test]
    fn test_partial_file() {
        let dir = write_settings(r#"{ "monthly_budget": 1000, "dark_mode": false }"#);
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings.monthly_budget, dec!(1000));
        assert!(!settings.dark_mode);
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_budget_as_string() {
        let dir = write_settings(r#"{ "monthly_budget": "2500.50", "currency_symbol": "$" }"#);
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings.monthly_budget, dec!(2500.50));
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_invalid_json() {
        let dir = write_settings("{ not json");
        let err = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let dir = write_settings(r#"{ "monthly_budget": -10 }"#);
        assert!(Settings::load(&dir.path().join(SETTINGS_FILE)).is_err());
    }

    #[test]
    fn test_negative_zero_budget_accepted() {
        let dir = write_settings(r#"{ "monthly_budget": "-0" }"#);
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert!(settings.monthly_budget.is_zero());
    }

    #[test]
    fn test_log_path_creates_data_dir() {
        let root = tempfile::tempdir().unwrap();
        let dirs = AppDirs {
            config_dir: root.path().join("config"),
            data_dir: root.path().join("data"),
        };
        let log = dirs.log_path().unwrap();
        assert!(root.path().join("data").is_dir());
        assert_eq!(log.file_name().unwrap(), "billtrack.log");
        assert_eq!(dirs.settings_path(), root.path().join("config").join(SETTINGS_FILE));
    }
}
