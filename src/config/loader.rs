use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "DBGBOOT_CONFIG";
/// Overrides `engine.command`.
pub const ENGINE_ENV: &str = "DBGBOOT_ENGINE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// `$DBGBOOT_CONFIG` when set, otherwise `dbgboot/config.toml` under
    /// `dirs::config_dir()`. Falls back to current directory if config_dir
    /// is unavailable.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("dbgboot").join("config.toml")
    }

    /// Loads configuration from the default config file, then applies
    /// environment overrides.
    ///
    /// - If the file doesn't exist, starts from `Config::default()`.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        config.apply_env(std::env::var(ENGINE_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply the `DBGBOOT_ENGINE` override. Empty values are ignored.
    pub fn apply_env(&mut self, engine: Option<String>) {
        if let Some(command) = engine.filter(|c| !c.trim().is_empty()) {
            tracing::debug!("Engine command overridden by {}: {}", ENGINE_ENV, command);
            self.engine.command = command;
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The engine command is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.command.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "engine.command must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
