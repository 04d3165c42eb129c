//! Configuration structures for the equity tracker.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration for the tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which sheet to open and where it lives.
    pub sheet: SheetConfig,
    /// Snapshot cache configuration.
    pub cache: CacheConfig,
    /// New entry configuration.
    pub entry: EntryConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Sections and fields missing from the file take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.sheet.spreadsheet_key.trim().is_empty() {
            return Err(Error::config("sheet.spreadsheet_key must not be empty"));
        }
        if self.sheet.worksheet.trim().is_empty() {
            return Err(Error::config("sheet.worksheet must not be empty"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(Error::config("cache.ttl_secs must be positive"));
        }
        if self.entry.decimal_places > 8 {
            return Err(Error::config("entry.decimal_places must be at most 8"));
        }
        Ok(())
    }
}

/// Sheet location and identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Path of the SQLite file backing the sheet.
    pub database_path: PathBuf,
    /// Identifier of the spreadsheet within the store.
    pub spreadsheet_key: String,
    /// Worksheet name (e.g., "Sheet1").
    pub worksheet: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("equity_tracker.db"),
            spreadsheet_key: "default".to_string(),
            worksheet: "Sheet1".to_string(),
        }
    }
}

/// Snapshot cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a computed snapshot stays valid, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 600 }
    }
}

/// New entry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Number of decimal places amounts are rounded to before appending.
    pub decimal_places: u32,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.sheet.worksheet, "Sheet1");
        assert_eq!(config.entry.decimal_places, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "sheet": {{ "spreadsheet_key": "abc123" }}, "cache": {{ "ttl_secs": 30 }} }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sheet.spreadsheet_key, "abc123");
        assert_eq!(config.sheet.worksheet, "Sheet1");
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/equity.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.cache.ttl_secs = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
