//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `shc.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "shc.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Poll-event processor settings.
    pub processor: ProcessorConfig,
    /// Registry output settings.
    pub output: OutputConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Number of rejected events kept for inspection.
    pub rejection_log_capacity: usize,
    /// Buffer of the change bus before slow subscribers lag.
    pub change_bus_capacity: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the registry JSON.
    pub pretty: bool,
}

impl Config {
    /// Load configuration from `shc.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|name| std::env::var(name).ok());
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

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SHC_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("SHC_REJECTION_LOG_CAPACITY")
            && let Ok(capacity) = val.parse()
        {
            self.processor.rejection_log_capacity = capacity;
        }
        if let Some(val) = var("SHC_OUTPUT_PRETTY")
            && let Ok(pretty) = val.parse()
        {
            self.output.pretty = pretty;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.processor.rejection_log_capacity == 0 {
            return Err(ConfigError::Validation(
                "rejection_log_capacity must be non-zero".to_string(),
            ));
        }
        if self.processor.change_bus_capacity == 0 {
            return Err(ConfigError::Validation(
                "change_bus_capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "shc_replay=info,shc_app=info".to_string(),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            rejection_log_capacity: 256,
            change_bus_capacity: 256,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
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
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
