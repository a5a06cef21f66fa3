//! CPU raster surface with PNG and JPEG export.
//!
//! Segments are drawn as anti-aliased capsules straight into an
//! [`RgbaImage`]. Vello only renders through a GPU device, and the headless
//! export and replay-frame paths must run without one, so this surface does
//! not go through a vello scene.

use crate::surface::{ImageFormat, StrokeSegment, Surface, SurfaceError, SurfaceResult};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use kurbo::{Cap, Point, Rect, Size, Vec2};
use zenflow_core::InkColor;

/// Seeded xorshift32, for repeatable paper grain.
struct GrainRng {
    state: u32,
}

impl GrainRng {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in [-amount, amount].
    fn offset(&mut self, amount: f64) -> f64 {
        ((self.next_u32() as f64 / u32::MAX as f64) * 2.0 - 1.0) * amount
    }
}

/// Per-pixel brightness noise applied on clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperGrain {
    pub seed: u32,
    /// Largest offset per channel, in 8-bit steps.
    pub amplitude: f64,
}

impl Default for PaperGrain {
    fn default() -> Self {
        Self { seed: 1, amplitude: 8.0 }
    }
}

/// Software rasteriser over an RGBA8 buffer.
///
/// Segments are anti-aliased capsules composited with source-over blending.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    grain: Option<PaperGrain>,
}

fn pixel_dimensions(size: Size) -> (u32, u32) {
    let clamp = |v: f64| if v.is_finite() && v > 0.0 { v.round() as u32 } else { 0 };
    (clamp(size.width), clamp(size.height))
}

impl RasterSurface {
    /// Add paper grain to every clear.
    pub fn with_grain(mut self, grain: PaperGrain) -> Self {
        self.grain = Some(grain);
        self
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.pixels.width() && y < self.pixels.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    fn blend(&mut self, x: u32, y: u32, src: [u8; 3], alpha: f64) {
        let dst = self.pixels.get_pixel_mut(x, y);
        for channel in 0..3 {
            let blended = src[channel] as f64 * alpha + dst[channel] as f64 * (1.0 - alpha);
            dst[channel] = blended.round().clamp(0.0, 255.0) as u8;
        }
        let dst_alpha = dst[3] as f64 / 255.0;
        dst[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }

    fn to_rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.pixels.width(), self.pixels.height(), |x, y| {
            let [r, g, b, _] = self.pixels.get_pixel(x, y).0;
            Rgb([r, g, b])
        })
    }
}

/// Distance from `p` to the segment's painted outline centre, or `None`
/// when `p` lies beyond a flat cap.
fn segment_distance(p: Point, segment: &StrokeSegment) -> Option<f64> {
    let along: Vec2 = segment.end - segment.start;
    let len_sq = along.hypot2();
    if len_sq == 0.0 {
        return match segment.cap {
            Cap::Butt => None,
            _ => Some(p.distance(segment.start)),
        };
    }

    let t = (p - segment.start).dot(along) / len_sq;
    match segment.cap {
        Cap::Round => {
            let nearest = segment.start + along * t.clamp(0.0, 1.0);
            Some(p.distance(nearest))
        }
        Cap::Butt | Cap::Square => {
            let extension = if segment.cap == Cap::Square {
                segment.width / 2.0 / len_sq.sqrt()
            } else {
                0.0
            };
            if t < -extension || t > 1.0 + extension {
                return None;
            }
            Some(p.distance(segment.start + along * t))
        }
    }
}

/// Encode RGBA pixel data to PNG bytes.
fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> SurfaceResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| SurfaceError::Encode(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| SurfaceError::Encode(format!("PNG data: {}", e)))?;
    }
    Ok(png_data)
}

fn encode_jpeg(rgb: &RgbImage, quality: f64) -> SurfaceResult<Vec<u8>> {
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut jpeg_data = Vec::new();
    {
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg_data, quality);
        encoder
            .encode_image(rgb)
            .map_err(|e| SurfaceError::Encode(format!("JPEG: {}", e)))?;
    }
    Ok(jpeg_data)
}

impl Surface for RasterSurface {
    fn create(size: Size) -> Self {
        let (width, height) = pixel_dimensions(size);
        Self {
            pixels: RgbaImage::new(width, height),
            grain: None,
        }
    }

    fn size(&self) -> Size {
        Size::new(self.pixels.width() as f64, self.pixels.height() as f64)
    }

    fn resize(&mut self, size: Size) {
        let (width, height) = pixel_dimensions(size);
        if (width, height) != self.pixels.dimensions() {
            self.pixels = RgbaImage::new(width, height);
        }
    }

    fn clear(&mut self, background: InkColor) {
        let fill = Rgba([background.r, background.g, background.b, 255]);
        match self.grain {
            None => {
                for pixel in self.pixels.pixels_mut() {
                    *pixel = fill;
                }
            }
            Some(grain) => {
                let mut rng = GrainRng::new(grain.seed);
                for pixel in self.pixels.pixels_mut() {
                    let noise = rng.offset(grain.amplitude);
                    let shift = |c: u8| (c as f64 + noise).round().clamp(0.0, 255.0) as u8;
                    *pixel = Rgba([shift(fill[0]), shift(fill[1]), shift(fill[2]), 255]);
                }
            }
        }
    }

    fn draw_line_segment(&mut self, segment: &StrokeSegment) {
        let radius = segment.width / 2.0;
        let alpha = segment.opacity.clamp(0.0, 1.0);
        if !radius.is_finite() || radius <= 0.0 || alpha == 0.0 {
            return;
        }

        let (width, height) = self.pixels.dimensions();
        let bounds = Rect::from_points(segment.start, segment.end)
            .inflate(radius + 1.0, radius + 1.0)
            .intersect(Rect::new(0.0, 0.0, width as f64, height as f64));
        if bounds.is_zero_area() || !bounds.is_finite() {
            return;
        }

        let src = [segment.color.r, segment.color.g, segment.color.b];
        let (x0, y0) = (bounds.x0.floor() as u32, bounds.y0.floor() as u32);
        let (x1, y1) = (
            (bounds.x1.ceil() as u32).min(width),
            (bounds.y1.ceil() as u32).min(height),
        );
        for y in y0..y1 {
            for x in x0..x1 {
                let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let Some(distance) = segment_distance(centre, segment) else {
                    continue;
                };
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, src, coverage * alpha);
                }
            }
        }
    }

    fn to_image_bytes(&self, format: ImageFormat, quality: f64) -> SurfaceResult<Vec<u8>> {
        let (width, height) = self.pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(SurfaceError::EmptySurface);
        }
        match format {
            ImageFormat::Png => encode_png(self.pixels.as_raw(), width, height),
            ImageFormat::Jpeg => encode_jpeg(&self.to_rgb(), quality),
        }
    }
}
