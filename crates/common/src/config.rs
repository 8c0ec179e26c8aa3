//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{FunheatError, FunheatResult};

/// Default raster width in pixels.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default raster height in pixels.
pub const DEFAULT_HEIGHT: u32 = 60;
/// Default number of time bins across the timeline.
pub const DEFAULT_NUM_SEGMENTS: usize = 600;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Heatmap raster settings.
    pub heatmap: HeatmapConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Heatmap generation parameters fixed at generator construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Output raster width in pixels.
    pub width: u32,

    /// Output raster height in pixels.
    pub height: u32,

    /// Number of fixed time bins the timeline is split into.
    pub num_segments: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "funheat=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            num_segments: DEFAULT_NUM_SEGMENTS,
        }
    }
}

impl HeatmapConfig {
    /// Check that the raster and bin counts are usable.
    ///
    /// At least two segments are required: stop positions are spread over
    /// `num_segments - 1` intervals.
    pub fn validate(&self) -> FunheatResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FunheatError::config(format!(
                "heatmap dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.num_segments < 2 {
            return Err(FunheatError::config(format!(
                "at least 2 segments are required, got {}",
                self.num_segments
            )));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("funheat").join("config.json")
}
