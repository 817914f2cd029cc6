//! huebridge Configuration Management
//!
//! Handles loading and managing configuration from ~/.huebridge/config.toml
//! and resolving it, together with the bundled presets, into engine options.

pub mod presets;

pub use presets::{Preset, get_preset, preset_names};

use huebridge_flow::{DEFAULT_JUMP_THRESHOLD, FlowDirection, SmoothingOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration directory name
const CONFIG_DIR_NAME: &str = ".huebridge";
/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "HUEBRIDGE_CONFIG_DIR";

/// Smoothing configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Strength in [0, 1]; below 0.5 blends colors in place, otherwise stacks overlays
    #[serde(default = "default_intensity")]
    pub intensity: f64,

    /// Overlay direction
    #[serde(default)]
    pub direction: FlowDirection,

    /// Bridge the last frame back to the first
    #[serde(default)]
    pub wrap_around: bool,

    /// Bundled preset name; when set it supplies intensity and direction
    #[serde(default)]
    pub preset: String,
}

fn default_intensity() -> f64 {
    huebridge_flow::DEFAULT_INTENSITY
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            intensity: default_intensity(),
            direction: FlowDirection::default(),
            wrap_around: false,
            preset: String::new(),
        }
    }
}

impl SmoothingConfig {
    /// Resolve into engine options
    ///
    /// Priority: bundled preset (if named and known) > explicit fields
    pub fn resolve(&self) -> SmoothingOptions {
        if !self.preset.trim().is_empty() {
            if let Some(preset) = get_preset(&self.preset) {
                log::info!("Using smoothing preset: {}", preset.name);
                return SmoothingOptions::new(preset.intensity, preset.direction, self.wrap_around);
            }
            log::warn!(
                "Preset '{}' not found, falling back to configured intensity {}",
                self.preset,
                self.intensity
            );
        }
        SmoothingOptions::new(self.intensity, self.direction, self.wrap_around)
    }
}

/// Harmony analysis configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Average normalized jump above which smoothing is recommended
    #[serde(default = "default_jump_threshold")]
    pub jump_threshold: f64,
}

fn default_jump_threshold() -> f64 {
    DEFAULT_JUMP_THRESHOLD
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            jump_threshold: default_jump_threshold(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Smoothing settings
    #[serde(default)]
    pub smoothing: SmoothingConfig,

    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            log::info!("Config file not found, creating default at {:?}", config_path);
            Self::create_default_config()?;
        }

        let config = Self::load_from(&config_path)?;
        log::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    }

    /// Load configuration, logging and falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        Self::parse(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the configuration directory path (~/.huebridge/ unless overridden)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file path (~/.huebridge/config.toml)
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Create the default configuration file and directory structure
    pub fn create_default_config() -> Result<(), ConfigError> {
        let config_dir = Self::config_dir()?;
        let config_path = Self::config_file_path()?;

        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::CreateDirError(config_dir.clone(), e))?;

        fs::write(&config_path, Self::default_config_text()?)
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e))?;

        log::info!("Created default configuration at {:?}", config_path);
        Ok(())
    }

    /// Default configuration as commented TOML
    pub fn default_config_text() -> Result<String, ConfigError> {
        let toml_content =
            toml::to_string_pretty(&Config::default()).map_err(ConfigError::SerializeError)?;

        Ok(format!(
            "# huebridge configuration\n\
             #\n\
             # smoothing.direction: diagonal | diagonal-mirror\n\
             # smoothing.preset: {}\n\
             \n\
             {toml_content}",
            preset_names().join(" | ")
        ))
    }

    /// Engine options for this configuration
    pub fn smoothing_options(&self) -> SmoothingOptions {
        self.smoothing.resolve()
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Home directory not found
    NoHomeDirectory,
    /// Failed to read config file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse config file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize config
    SerializeError(toml::ser::Error),
    /// Failed to write config file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDirectory => write!(f, "Could not determine home directory"),
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize config: {}", e),
            ConfigError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            ConfigError::CreateDirError(path, e) => write!(f, "Failed to create {:?}: {}", path, e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e)
            | ConfigError::WriteError(_, e)
            | ConfigError::CreateDirError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
            ConfigError::NoHomeDirectory => None,
        }
    }
}
