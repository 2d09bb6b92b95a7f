//! Configuration module
//!
//! Handles loading and saving PunchHole configuration: the device identity,
//! the display state to resolve against, and vendor feature values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cutout::{CutoutBounds, DisplaySnapshot, Platform, StaticDisplay, VENDOR_MANUFACTURER};
use crate::feature::{self, FeatureSource, PUNCH_HOLE_KEY};
use crate::geometry::{Rect, RealSize, Rotation};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Device identity
    #[serde(default)]
    pub device: DeviceConfig,

    /// Display state
    #[serde(default)]
    pub display: DisplayConfig,

    /// Vendor feature store
    #[serde(default)]
    pub features: FeaturesConfig,
}

/// Device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Manufacturer name
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,
    /// Platform SDK level
    #[serde(default = "default_sdk_int")]
    pub sdk_int: u32,
}

fn default_manufacturer() -> String {
    VENDOR_MANUFACTURER.to_string()
}

fn default_sdk_int() -> u32 {
    33
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            manufacturer: default_manufacturer(),
            sdk_int: default_sdk_int(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rotation in degrees (0, 90, 180, 270)
    #[serde(default)]
    pub rotation: Rotation,
    /// Real width in pixels for this rotation
    #[serde(default = "default_width")]
    pub width: u32,
    /// Real height in pixels for this rotation
    #[serde(default = "default_height")]
    pub height: u32,
    /// Camera margin below the status bar top (negative = unavailable)
    pub camera_top_margin: Option<i32>,
    /// Cutout rects reported by the OS (absent = no cutout support)
    pub cutout: Option<CutoutBounds>,
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    2400
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation: Rotation::default(),
            width: default_width(),
            height: default_height(),
            camera_top_margin: None,
            cutout: None,
        }
    }
}

/// Feature store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Floating-feature file to read (platform default if not set)
    pub file: Option<PathBuf>,
    /// Values that override the file
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location
    pub fn load_default() -> ConfigResult<Self> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("punchhole/config.toml")),
            Some(PathBuf::from("./punchhole.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                tracing::debug!("Using config file {:?}", path);
                return Self::load(path);
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn platform(&self) -> Platform {
        Platform::new(self.device.manufacturer.clone(), self.device.sdk_int)
    }

    /// Display state as the platform would report it.
    ///
    /// Platforms below the cutout SDK level report no cutout.
    pub fn snapshot(&self) -> DisplaySnapshot {
        let cutout = self
            .display
            .cutout
            .filter(|_| self.platform().supports_cutout_bounds());

        DisplaySnapshot::new(
            self.display.rotation,
            RealSize::new(self.display.width, self.display.height),
            cutout,
        )
    }

    pub fn display(&self) -> StaticDisplay {
        StaticDisplay::new(self.snapshot(), self.display.camera_top_margin)
    }

    /// Open the configured feature store
    pub fn open_features(&self) -> Box<dyn FeatureSource> {
        feature::open_source(self.features.file.as_deref(), &self.features.values)
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config() -> ConfigResult<String> {
    let config = Config {
        display: DisplayConfig {
            camera_top_margin: Some(24),
            cutout: Some(CutoutBounds {
                top: Rect::new(506, 0, 574, 110),
                ..Default::default()
            }),
            ..Default::default()
        },
        features: FeaturesConfig {
            file: None,
            values: {
                let mut m = HashMap::new();
                m.insert(
                    PUNCH_HOLE_KEY.to_string(),
                    "pos:0.5:0.03125,size:0.0625:0.03125,type:circle".to_string(),
                );
                m
            },
        },
        ..Default::default()
    };

    Ok(toml::to_string_pretty(&config)?)
}
