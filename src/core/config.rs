//! Configuration module for `gymevo`

use crate::core::models::parse_utc_offset;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside path-like values
const DIR_VARIABLE: &str = "$GYM_EVO";

/// A4 height in millimetres
const DEFAULT_PAGE_HEIGHT: f32 = 297.0;

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Remote store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the gym API
    #[serde(default)]
    pub endpoint: String,
    /// Bearer credential saved by `gymevo login`; empty when logged out
    #[serde(default)]
    pub token: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Report rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// UTC offset (`-03:00`, `+01:00`, `Z`) used to read calendar dates from instants
    #[serde(default)]
    pub utc_offset: String,
    /// Page height in layout units (millimetres)
    #[serde(default)]
    pub page_height: f32,
    /// Default report format (markdown, html, pdf)
    #[serde(default)]
    pub format: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override API endpoint
    pub endpoint: Option<String>,
    /// Override bearer token
    pub token: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override calendar UTC offset
    pub utc_offset: Option<String>,
}

impl Config {
    /// Get the `$GYM_EVO` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gymevo`
    /// - macOS: `~/Library/Application Support/gymevo`
    /// - Windows: `%APPDATA%\gymevo`
    #[must_use]
    pub fn get_gymevo_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gymevo")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled,
    /// so upgrading picks up new keys without touching user settings. The
    /// token is never merged: an empty token means "logged out".
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (value, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.api.endpoint, &defaults.api.endpoint),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.report.utc_offset, &defaults.report.utc_offset),
            (&mut self.report.format, &defaults.report.format),
        ] {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        if self.report.page_height <= 0.0 && defaults.report.page_height > 0.0 {
            self.report.page_height = defaults.report.page_height;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the config file is not modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.api.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &overrides.token {
            self.api.token.clone_from(token);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(offset) = &overrides.utc_offset {
            self.report.utc_offset.clone_from(offset);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gymevo_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GYM_EVO` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gymevo_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults (empty strings, `false`, `0.0`).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, creating it from defaults on first run
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `config_file`, creating it from defaults if missing
    ///
    /// Falls back to defaults if the file exists but cannot be read or parsed.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        let Ok(content) = fs::read_to_string(config_file) else {
            return defaults;
        };
        match Self::from_toml(&content) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            Err(e) => {
                logger::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `config_file`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `endpoint`, `token`,
    /// `reports_dir`, `utc_offset`, `page_height`, `format`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "endpoint" => Some(self.api.endpoint.clone()),
            "token" => Some(self.api.token.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "utc_offset" | "utc-offset" => Some(self.report.utc_offset.clone()),
            "page_height" | "page-height" => Some(self.report.page_height.to_string()),
            "format" => Some(self.report.format.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value.parse::<logger::Level>()?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "endpoint" => self.api.endpoint = value.to_string(),
            "token" => self.api.token = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "utc_offset" | "utc-offset" => {
                parse_utc_offset(value)?;
                self.report.utc_offset = value.to_string();
            }
            "page_height" | "page-height" => {
                let height = value
                    .parse::<f32>()
                    .ok()
                    .filter(|h| *h > 0.0)
                    .ok_or_else(|| format!("Invalid page height: '{value}'"))?;
                self.report.page_height = height;
            }
            "format" => {
                value.parse::<crate::core::report::ReportFormat>()?;
                self.report.format = value.to_ascii_lowercase();
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "endpoint" => self.api.endpoint.clone_from(&defaults.api.endpoint),
            "token" => self.api.token.clone_from(&defaults.api.token),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "utc_offset" | "utc-offset" => self
                .report
                .utc_offset
                .clone_from(&defaults.report.utc_offset),
            "page_height" | "page-height" => self.report.page_height = defaults.report.page_height,
            "format" => self.report.format.clone_from(&defaults.report.format),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Calendar zone used for month/year filtering and date labels
    ///
    /// # Errors
    /// Returns an error if `report.utc_offset` is not a valid offset
    pub fn calendar_zone(&self) -> Result<FixedOffset, String> {
        parse_utc_offset(&self.report.utc_offset)
    }

    /// Page height for report layout, falling back to A4
    #[must_use]
    pub fn page_height(&self) -> f32 {
        if self.report.page_height > 0.0 {
            self.report.page_height
        } else {
            DEFAULT_PAGE_HEIGHT
        }
    }

    /// Bearer token, if one is stored
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let token = self.api.token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[api]")?;
        writeln!(f, "  endpoint = \"{}\"", self.api.endpoint)?;
        let token = if self.api.token.is_empty() {
            "(logged out)"
        } else {
            "********"
        };
        writeln!(f, "  token = \"{token}\"")?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[report]")?;
        writeln!(f, "  utc_offset = \"{}\"", self.report.utc_offset)?;
        writeln!(f, "  page_height = {}", self.report.page_height)?;
        writeln!(f, "  format = \"{}\"", self.report.format)?;

        Ok(())
    }
}
