//! Typed configuration loading for simulation runs.
//!
//! Study configurations live in YAML files; this module defines the
//! strongly-typed structs that mirror that structure and a loader that
//! reads and validates them. Every field has a default matching the
//! present-day baseline, so a minimal file only names the values a study
//! actually sweeps.

use std::path::Path;

use serde::Deserialize;

use crate::engine::RunOptions;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run parameters (seed, horizon, early exit).
    #[serde(default)]
    pub run: RunConfig,

    /// Initial world conditions.
    #[serde(default)]
    pub world: WorldBootstrapConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Seed for the run's RNG stream.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Horizon in simulated months.
    #[serde(default = "default_max_months")]
    pub max_months: u64,

    /// Whether a terminal outcome ends the run before the horizon.
    #[serde(default = "default_true")]
    pub early_exit_on_outcome: bool,
}

impl RunConfig {
    /// Build engine [`RunOptions`] from this config (no observer).
    pub const fn to_options(&self) -> RunOptions {
        RunOptions::new(self.seed, self.max_months).with_early_exit(self.early_exit_on_outcome)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_months: default_max_months(),
            early_exit_on_outcome: true,
        }
    }
}

/// Initial world conditions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldBootstrapConfig {
    /// Starting population in billions.
    #[serde(default = "default_population_billions")]
    pub initial_population_billions: f64,

    /// Annualised baseline population growth rate.
    #[serde(default = "default_growth_rate")]
    pub baseline_growth_rate: f64,

    /// Starting gross world output in trillions.
    #[serde(default = "default_output_trillions")]
    pub initial_output_trillions: f64,

    /// Starting temperature anomaly in degrees Celsius.
    #[serde(default = "default_temperature_anomaly")]
    pub initial_temperature_anomaly_c: f64,

    /// Starting AI capability index.
    #[serde(default = "default_capability_index")]
    pub initial_capability_index: f64,
}

impl WorldBootstrapConfig {
    /// Convert to the world crate's bootstrap parameters.
    pub const fn to_params(&self) -> foresight_world::WorldParams {
        foresight_world::WorldParams {
            initial_population_billions: self.initial_population_billions,
            baseline_growth_rate: self.baseline_growth_rate,
            initial_output_trillions: self.initial_output_trillions,
            initial_temperature_anomaly_c: self.initial_temperature_anomaly_c,
            initial_capability_index: self.initial_capability_index,
        }
    }
}

impl Default for WorldBootstrapConfig {
    fn default() -> Self {
        Self {
            initial_population_billions: default_population_billions(),
            baseline_growth_rate: default_growth_rate(),
            initial_output_trillions: default_output_trillions(),
            initial_temperature_anomaly_c: default_temperature_anomaly(),
            initial_capability_index: default_capability_index(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_max_months() -> u64 {
    1200
}

const fn default_population_billions() -> f64 {
    8.1
}

const fn default_growth_rate() -> f64 {
    0.008
}

const fn default_output_trillions() -> f64 {
    105.0
}

const fn default_temperature_anomaly() -> f64 {
    1.3
}

const fn default_capability_index() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.run.seed, 42);
        assert_eq!(config.run.max_months, 1200);
        assert!(config.run.early_exit_on_outcome);
        assert_eq!(config.world.initial_population_billions, 8.1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
run:
  seed: 123
  max_months: 240
  early_exit_on_outcome: false

world:
  initial_population_billions: 7.5
  baseline_growth_rate: 0.004
  initial_output_trillions: 90.0
  initial_temperature_anomaly_c: 1.8
  initial_capability_index: 2.0

logging:
  level: debug
";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.run.seed, 123);
        assert_eq!(config.run.max_months, 240);
        assert!(!config.run.early_exit_on_outcome);
        assert_eq!(config.world.initial_population_billions, 7.5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml_uses_defaults() {
        let config = SimulationConfig::parse("run:\n  seed: 7\n").unwrap();
        assert_eq!(config.run.seed, 7);
        assert_eq!(config.run.max_months, 1200);
        assert_eq!(config.world.initial_capability_index, 1.0);
    }

    #[test]
    fn parse_empty_mapping_uses_defaults() {
        let config = SimulationConfig::parse("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn run_config_converts_to_options() {
        let config = RunConfig {
            seed: 9,
            max_months: 60,
            early_exit_on_outcome: true,
        };
        let options = config.to_options();
        assert_eq!(options.seed, 9);
        assert_eq!(options.max_months, 60);
        assert!(options.early_exit_on_outcome);
    }

    #[test]
    fn bootstrap_config_converts_to_params() {
        let config = WorldBootstrapConfig::default();
        let params = config.to_params();
        assert_eq!(params.initial_population_billions, 8.1);
    }
}
