//! Drawable surface abstraction.

use kurbo::{Cap, Point, Size, Stroke};
use peniko::Color;
use thiserror::Error;
use zenflow_core::InkColor;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface has no pixels")]
    EmptySurface,
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Encoded image format for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(SurfaceError::Unsupported(format!("image format '{}'", other))),
        }
    }
}

/// One straight piece of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    pub start: Point,
    pub end: Point,
    pub color: InkColor,
    pub opacity: f64,
    /// Line width in surface pixels.
    pub width: f64,
    pub cap: Cap,
}

impl StrokeSegment {
    /// A round-capped segment.
    pub fn new(start: Point, end: Point, color: InkColor, opacity: f64, width: f64) -> Self {
        Self {
            start,
            end,
            color,
            opacity,
            width,
            cap: Cap::Round,
        }
    }

    /// Paint color including opacity.
    pub fn paint(&self) -> Color {
        self.color.with_opacity(self.opacity)
    }

    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.width).with_caps(self.cap)
    }

    pub fn line(&self) -> kurbo::Line {
        kurbo::Line::new(self.start, self.end)
    }
}

/// Something the path renderer can draw on.
///
/// Implementations can rasterise on the CPU, record segments for
/// inspection, or encode a GPU scene.
pub trait Surface {
    /// Create a surface of the given size, in pixels.
    fn create(size: Size) -> Self
    where
        Self: Sized;

    fn size(&self) -> Size;

    /// Change the size. Contents are discarded.
    fn resize(&mut self, size: Size);

    /// Fill the whole surface with `background`.
    fn clear(&mut self, background: InkColor);

    fn draw_line_segment(&mut self, segment: &StrokeSegment);

    /// Encode the current contents. `quality` in `[0, 1]` applies to JPEG only.
    fn to_image_bytes(&self, format: ImageFormat, quality: f64) -> SurfaceResult<Vec<u8>>;
}
