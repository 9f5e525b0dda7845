//! Configuration for Pagewire
//!
//! Aggregates the settings of every crate and reads/writes them as JSON or
//! TOML, chosen by file extension:
//! - Event bus settings (handler failure policy)
//! - Image resizer settings (minimum width, corner band)
//! - Logging settings (level, output format)

use pagewire_core::{Error, EventBusConfig, Result};
use pagewire_markdown::ResizerSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set, e.g. `info` or `pagewire_core=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event bus settings
    pub bus: EventBusConfig,
    /// Image resizer settings
    pub resizer: ResizerSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?,
            Format::Toml => toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?,
            Format::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        let min_width = self.resizer.min_width;
        if !min_width.is_finite() || min_width <= 0.0 {
            return Err(Error::invalid_setting(
                "resizer.min_width",
                "must be a positive number",
            ));
        }

        let corner = self.resizer.corner_zone_px;
        if !corner.is_finite() || corner < 0.0 {
            return Err(Error::invalid_setting(
                "resizer.corner_zone_px",
                "must be a non-negative number",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::invalid_setting("logging.level", "must not be empty"));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(Error::other("Config file must be .json or .toml")),
        }
    }
}
