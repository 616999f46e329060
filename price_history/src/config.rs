use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::synthesizer::{DEFAULT_CURRENCY, DEFAULT_STORES};

/// Engine settings. Every field has a default, so a TOML file only needs the
/// keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub default_window_days: u32,
    pub max_window_days: u32,
    pub currency: String,
    pub stores: Vec<String>,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Reported as the `source` of synthesized histories
    pub source_label: String,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_window_days: 90,
            max_window_days: 730,
            currency: DEFAULT_CURRENCY.to_string(),
            stores: DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
            seed: None,
            source_label: "synthetic".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults, then the optional file, then `PRICEWATCH_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        toml::from_str(&raw)
            .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read("PRICEWATCH_DEFAULT_WINDOW_DAYS") {
            self.default_window_days = parse_u32("PRICEWATCH_DEFAULT_WINDOW_DAYS", &value)?;
        }
        if let Some(value) = read("PRICEWATCH_MAX_WINDOW_DAYS") {
            self.max_window_days = parse_u32("PRICEWATCH_MAX_WINDOW_DAYS", &value)?;
        }
        if let Some(value) = read("PRICEWATCH_CURRENCY") {
            self.currency = value.trim().to_ascii_uppercase();
        }
        if let Some(value) = read("PRICEWATCH_SEED") {
            let seed = value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "PRICEWATCH_SEED".to_string(),
                value: value.clone(),
            })?;
            self.seed = Some(seed);
        }
        if let Some(value) = read("PRICEWATCH_LOG_LEVEL") {
            self.log_level = value;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stores.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation("at least one store is required".to_string()));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "currency `{}` is not an ISO 4217 code",
                self.currency
            )));
        }

        if self.default_window_days > self.max_window_days {
            return Err(ConfigError::Validation(format!(
                "default_window_days ({}) exceeds max_window_days ({})",
                self.default_window_days, self.max_window_days
            )));
        }

        if self.source_label.trim().is_empty() {
            return Err(ConfigError::Validation("source_label cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
