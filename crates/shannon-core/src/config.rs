//! Configuration module

use crate::estimator::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};
use crate::{Error, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File reading settings
    pub scan: ScanConfig,
    /// Terminal output settings
    pub output: OutputConfig,
}

/// File reading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Bytes per read, also the size of each sample
    pub block_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show a progress bar while reading
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

impl Config {
    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = config_dir().ok_or_else(|| {
            Error::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join("shannon").join("config.toml"))
    }

    /// Get default configuration content with comments
    pub fn default_config_content() -> String {
        format!(
            r#"# Shannon Configuration File

[scan]
# Bytes read per I/O operation; sparse sampling reads one block per sample
block_size = {DEFAULT_BLOCK_SIZE}

[output]
# Show a progress bar while reading
progress = true
"#
        )
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no file exists there
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.scan.block_size == 0 {
            return Err(Error::Config(
                "scan.block_size must be greater than zero".to_string(),
            ));
        }
        if self.scan.block_size > MAX_BLOCK_SIZE {
            return Err(Error::Config(format!(
                "scan.block_size must be at most {} bytes",
                MAX_BLOCK_SIZE
            )));
        }
        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}
