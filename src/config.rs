//! Configuration for chainbuild.
//!
//! Settings are read from `chainbuild.toml` and layered
//! file → environment → CLI.
//!
//! # Configuration File Format
//!
//! ```toml
//! [display]
//! start_time_format = "%Y-%m-%d %H:%M:%S"
//! not_built_label = "not built yet"
//!
//! [logging]
//! level = "warn"
//! json = false
//! ```

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `display.start_time_format`.
pub const TIME_FORMAT_ENV: &str = "CHAINBUILD_TIME_FORMAT";

/// Start time pattern used when none is configured or the configured one is invalid.
pub const DEFAULT_START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "CHAINBUILD_LOG";

/// How refreshed sub-build fields are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// strftime pattern for a run's local start time
    #[serde(default = "default_start_time_format")]
    pub start_time_format: String,
    /// Duration text shown for a sub-build with no matching run
    #[serde(default = "default_not_built_label")]
    pub not_built_label: String,
}

fn default_start_time_format() -> String {
    DEFAULT_START_TIME_FORMAT.to_string()
}

fn default_not_built_label() -> String {
    "not built yet".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            start_time_format: default_start_time_format(),
            not_built_label: default_not_built_label(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Default filter level when `CHAINBUILD_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// The complete chainbuild.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainbuildToml {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ChainbuildToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse chainbuild.toml")
    }

    /// Load configuration, or defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize chainbuild.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !is_valid_time_format(&self.display.start_time_format) {
            warnings.push(format!(
                "display.start_time_format '{}' is not a valid strftime pattern",
                self.display.start_time_format
            ));
        }

        if self.display.not_built_label.trim().is_empty() {
            warnings.push("display.not_built_label is empty".to_string());
        }

        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            warnings.push(format!("logging.level '{}' is not a known level", self.logging.level));
        }

        warnings
    }

    /// Display settings with environment overrides applied.
    ///
    /// An invalid start time format falls back to the default pattern.
    pub fn effective_display(&self) -> DisplaySettings {
        let mut settings = self.display.clone();
        if let Ok(format) = std::env::var(TIME_FORMAT_ENV) {
            settings.start_time_format = format;
        }
        if !is_valid_time_format(&settings.start_time_format) {
            let invalid = settings.start_time_format.as_str();
            tracing::warn!(format = invalid, "Invalid start time format, using default");
            settings.start_time_format = default_start_time_format();
        }
        settings
    }
}

/// Check that a strftime pattern formats without error.
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
