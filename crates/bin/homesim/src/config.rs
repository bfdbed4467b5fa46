//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory (or the file named by
//! `HOMESIM_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use homesim_adapter_log_file::DEFAULT_PATH;
use homesim_domain::device::{Device, Kind};
use homesim_domain::log_entry::SEPARATOR;
use homesim_domain::registry::Registry;

const DEFAULT_FILE: &str = "homesim.toml";

/// Default tracing filter: diagnostics stay quiet unless something degrades.
pub const DEFAULT_FILTER: &str = "homesim=warn";

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Action log settings.
    pub log: LogConfig,
    /// Diagnostics settings.
    pub logging: LoggingConfig,
    /// Terminal rendering settings.
    pub display: DisplayConfig,
    /// Devices to create at start-up, in display order.
    pub devices: Vec<DeviceConfig>,
}

/// Action log configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path of the plain-text action log.
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Terminal rendering configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Emit ANSI colors.
    pub color: bool,
    /// Clear the screen before each menu.
    pub clear_screen: bool,
}

/// One device of the seed set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    pub kind: Kind,
    pub name: String,
}

impl DeviceConfig {
    fn new(kind: Kind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `homesim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMESIM_CONFIG").unwrap_or_else(|_| DEFAULT_FILE.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMESIM_LOG_FILE") {
            self.log.path = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_COLOR") {
            self.display.color = !matches!(val.as_str(), "0" | "false" | "no" | "off");
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.display.color = false;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.log.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log path must not be empty".to_string(),
            ));
        }
        if self.devices.is_empty() {
            return Err(ConfigError::Validation(
                "at least one device is required".to_string(),
            ));
        }
        if let Some(position) = self.devices.iter().position(|d| d.name.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "device #{} has an empty name",
                position + 1
            )));
        }
        if let Some((position, device)) = self
            .devices
            .iter()
            .enumerate()
            .find(|(_, d)| !is_loggable_name(&d.name))
        {
            return Err(ConfigError::Validation(format!(
                "device #{} name {:?} must not contain control characters or \"{SEPARATOR}\"",
                position + 1,
                device.name
            )));
        }
        Ok(())
    }

    /// Build the device registry described by `devices`.
    #[must_use]
    pub fn registry(&self) -> Registry {
        self.devices
            .iter()
            .map(|d| Device::new(d.kind, d.name.clone()))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            logging: LoggingConfig::default(),
            display: DisplayConfig::default(),
            devices: default_devices(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            clear_screen: true,
        }
    }
}

/// A name that keeps its log entry on one line and parses back unchanged.
fn is_loggable_name(name: &str) -> bool {
    !name.chars().any(char::is_control) && !name.contains(SEPARATOR)
}

/// The home every fresh install starts with.
fn default_devices() -> Vec<DeviceConfig> {
    vec![
        DeviceConfig::new(Kind::Light, "Living Room Light"),
        DeviceConfig::new(Kind::Light, "Bedroom Light"),
        DeviceConfig::new(Kind::Fan, "Living Room Fan"),
        DeviceConfig::new(Kind::Fan, "Bedroom Fan"),
        DeviceConfig::new(Kind::Camera, "Front Door Camera"),
        DeviceConfig::new(Kind::Camera, "Backyard Camera"),
        DeviceConfig::new(Kind::Thermostat, "Home Thermostat"),
    ]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
