//! Ink color values.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The brush palette offered by the canvas.
pub const PALETTE: [InkColor; 6] = [
    InkColor::new(0x4E, 0xCD, 0xC4),
    InkColor::new(0xFF, 0x6B, 0x6B),
    InkColor::new(0x95, 0xE1, 0xD3),
    InkColor::new(0xF3, 0x81, 0x81),
    InkColor::new(0xAA, 0x96, 0xDA),
    InkColor::new(0xFC, 0xBA, 0xD3),
];

/// Default brush color (first palette entry).
pub const DEFAULT_INK_COLOR: InkColor = PALETTE[0];

/// Canvas background color.
pub const BACKGROUND_COLOR: InkColor = InkColor::new(20, 20, 30);

/// Error returned when a color string is not `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ColorParseError(pub String);

/// An opaque sRGB color, stored on the wire as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl InkColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a renderer color with the given opacity in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }

    /// Format as upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for InkColor {
    fn default() -> Self {
        DEFAULT_INK_COLOR
    }
}

impl FromStr for InkColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for InkColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InkColor> for String {
    fn from(color: InkColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color: InkColor = "#4ecdc4".parse().unwrap();
        assert_eq!(color, InkColor::new(0x4E, 0xCD, 0xC4));
        assert_eq!(color.to_hex(), "#4ECDC4");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("4ECDC4".parse::<InkColor>().is_err());
        assert!("#4ECDC".parse::<InkColor>().is_err());
        assert!("#GGGGGG".parse::<InkColor>().is_err());
        assert!("#ÄÄÄ".parse::<InkColor>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&InkColor::new(255, 107, 107)).unwrap();
        assert_eq!(json, "\"#FF6B6B\"");
        let back: InkColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, InkColor::new(255, 107, 107));
        assert!(serde_json::from_str::<InkColor>("\"red\"").is_err());
    }

    #[test]
    fn test_opacity_alpha() {
        let rgba = InkColor::new(10, 20, 30).with_opacity(0.5).to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (10, 20, 30, 128));
    }
}
