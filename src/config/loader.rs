// src/config/loader.rs
//! Configuration loader layering an optional TOML file over the defaults

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{constants::paths, PipelineConfig};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Configuration validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Loads [`PipelineConfig`] from defaults plus any existing override files
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Loader looking for `accel_dsp.toml` in the working directory
    pub fn new() -> Self {
        Self {
            config_paths: vec![PathBuf::from(paths::CONFIG_FILE)],
        }
    }

    /// Create loader with custom paths, later paths win
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths }
    }

    /// Merge every existing file over the defaults and validate the result
    pub fn load(&self) -> Result<PipelineConfig, ConfigError> {
        let mut merged = toml::Value::try_from(&PipelineConfig::default())?;

        for path in &self.config_paths {
            if !path.exists() {
                tracing::debug!("Config file {} not present, skipping", path.display());
                continue;
            }
            tracing::info!("Loading configuration overrides from {}", path.display());
            let overlay = Self::load_file(path)?;
            merge_toml_values(&mut merged, overlay);
        }

        let config: PipelineConfig = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a complete or partial configuration document
    pub fn from_toml_str(content: &str) -> Result<PipelineConfig, ConfigError> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a configuration as pretty TOML
    pub fn export<P: AsRef<Path>>(config: &PipelineConfig, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn load_file(path: &Path) -> Result<toml::Value, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml_values(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base_value, overlay_value) => {
            *base_value = overlay_value;
        }
    }
}
