//! Live brush tool settings.

use crate::color::InkColor;
use crate::path::DEFAULT_INK_OPACITY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BRUSH_SIZE: f64 = 5.0;
pub const MIN_BRUSH_SIZE: f64 = 1.0;
pub const MAX_BRUSH_SIZE: f64 = 20.0;

/// Color, size and opacity applied to the stroke being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    color: InkColor,
    brush_size: f64,
    opacity: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: InkColor::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            opacity: DEFAULT_INK_OPACITY,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> InkColor {
        self.color
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_color(&mut self, color: InkColor) {
        self.color = color;
    }

    /// Set the base brush size, clamped to the slider range.
    pub fn set_brush_size(&mut self, size: f64) {
        if size.is_nan() {
            return;
        }
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_nan() {
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}
