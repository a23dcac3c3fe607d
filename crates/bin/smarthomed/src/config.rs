//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory, or the path named by
//! `SMARTHOME_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::str::FromStr;

use chrono::Duration;
use serde::Deserialize;
use smarthome_domain::error::ValidationError;
use smarthome_domain::functionality::{
    ActuatorBehavior, ActuatorCatalog, Behavior, FunctionalityCatalog, SensorBehavior,
    SensorCatalog,
};
use smarthome_domain::id::DeviceId;

const DEFAULT_PATH: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Functionality catalogs.
    pub catalog: CatalogConfig,
    /// Query tuning.
    pub queries: QueriesConfig,
    /// Power metering.
    pub power: PowerConfig,
    /// Demo data.
    pub seed: SeedConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Catalog overrides. Empty lists select the standard catalog.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub sensors: Vec<CatalogEntry>,
    pub actuators: Vec<CatalogEntry>,
}

/// One functionality and the behavior it resolves to.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub functionality: String,
    pub behavior: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QueriesConfig {
    /// Largest gap, in minutes, between two readings compared as simultaneous.
    pub temperature_tolerance_minutes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Device id of the grid power meter.
    pub grid_power_meter: String,
    /// Reporting cadence of the grid power meter, in minutes.
    pub cadence_minutes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Populate the stores with the demo house at start-up.
    pub demo: bool,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SMARTHOME_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
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
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.temperature_tolerance()?;
        self.power_cadence()?;
        if self.power.grid_power_meter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "grid power meter id must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Largest gap between two readings compared as simultaneous.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] unless the value is a positive
    /// number of minutes that fits a [`Duration`].
    pub fn temperature_tolerance(&self) -> Result<Duration, ConfigError> {
        positive_minutes(
            self.queries.temperature_tolerance_minutes,
            "temperature tolerance",
        )
    }

    /// Reporting cadence of the grid power meter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] unless the value is a positive
    /// number of minutes that fits a [`Duration`].
    pub fn power_cadence(&self) -> Result<Duration, ConfigError> {
        positive_minutes(self.power.cadence_minutes, "power meter cadence")
    }

    /// The grid power meter device id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] when the id is blank.
    pub fn grid_power_meter(&self) -> Result<DeviceId, ConfigError> {
        Ok(DeviceId::new(self.power.grid_power_meter.as_str())?)
    }

    /// The sensor catalog: configured entries, or the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] for unknown behaviors, blank or
    /// duplicate functionality ids.
    pub fn sensor_catalog(&self) -> Result<SensorCatalog, ConfigError> {
        build_catalog::<SensorBehavior>(&self.catalog.sensors)
    }

    /// The actuator catalog: configured entries, or the standard catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] for unknown behaviors, blank or
    /// duplicate functionality ids.
    pub fn actuator_catalog(&self) -> Result<ActuatorCatalog, ConfigError> {
        build_catalog::<ActuatorBehavior>(&self.catalog.actuators)
    }
}

fn positive_minutes(minutes: i64, name: &str) -> Result<Duration, ConfigError> {
    if minutes <= 0 {
        return Err(ConfigError::Validation(format!("{name} must be positive")));
    }
    Duration::try_minutes(minutes).ok_or_else(|| {
        ConfigError::Validation(format!("{name} of {minutes} minutes is too large"))
    })
}

fn build_catalog<B>(entries: &[CatalogEntry]) -> Result<FunctionalityCatalog<B>, ConfigError>
where
    B: Behavior + FromStr<Err = ValidationError>,
    B::Id: FromStr<Err = ValidationError>,
{
    if entries.is_empty() {
        return Ok(FunctionalityCatalog::standard());
    }
    let resolved = entries
        .iter()
        .map(|entry| Ok((entry.functionality.parse()?, entry.behavior.parse()?)))
        .collect::<Result<Vec<(B::Id, B)>, ValidationError>>()?;
    Ok(FunctionalityCatalog::from_entries(resolved)?)
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info".to_string(),
        }
    }
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            temperature_tolerance_minutes: 10,
        }
    }
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            grid_power_meter: "Grid Power Meter".to_string(),
            cadence_minutes: 15,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo: true }
    }
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
    /// A catalog entry or identifier is invalid.
    #[error("invalid catalog entry")]
    Catalog(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
