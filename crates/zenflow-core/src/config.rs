//! Configuration for capture, replay and the canvas surface.
//!
//! Every section deserialises with defaults, so a config file only needs the
//! keys it overrides.

use crate::brush::BrushParams;
use crate::color::{BACKGROUND_COLOR, InkColor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Brush physics tuning. The base size comes from the live tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub smoothness: f64,
    pub taper_threshold: f64,
    pub taper_multiplier: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            smoothness: 0.5,
            taper_threshold: 2.0,
            taper_multiplier: 1.8,
        }
    }
}

impl BrushConfig {
    pub fn params(&self, base_size: f64) -> BrushParams {
        BrushParams {
            base_size,
            smoothness: self.smoothness.clamp(0.0, 1.0),
            taper_threshold: self.taper_threshold,
            taper_multiplier: self.taper_multiplier,
        }
    }
}

/// Replay timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Delay between revealed points, in milliseconds.
    pub point_delay_ms: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self { point_delay_ms: 10 }
    }
}

impl ReplayConfig {
    pub fn point_delay(&self) -> Duration {
        Duration::from_millis(self.point_delay_ms)
    }
}

/// Drawable surface sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
    /// Width / height ratio kept when fitting the container.
    pub aspect_ratio: f64,
    /// Largest share of the viewport height the surface may take.
    pub max_viewport_fraction: f64,
    pub background: InkColor,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            aspect_ratio: 4.0 / 3.0,
            max_viewport_fraction: 0.85,
            background: BACKGROUND_COLOR,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZenflowConfig {
    pub brush: BrushConfig,
    pub replay: ReplayConfig,
    pub canvas: CanvasConfig,
    /// Artwork directory; the platform data dir when unset.
    pub store_dir: Option<PathBuf>,
}

impl ZenflowConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
