//! Vello scene surface.

use crate::surface::{ImageFormat, StrokeSegment, Surface, SurfaceError, SurfaceResult};
use kurbo::{Affine, Rect, Size};
use peniko::{Color, Fill};
use vello::Scene;
use zenflow_core::InkColor;

/// Encodes draw calls into a Vello [`Scene`] for GPU rendering.
///
/// The host owns the device and render target; this surface only builds
/// the scene.
pub struct VelloSurface {
    scene: Scene,
    size: Size,
    segments: usize,
}

impl VelloSurface {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the scene, leaving an empty one behind.
    pub fn take_scene(&mut self) -> Scene {
        self.segments = 0;
        std::mem::take(&mut self.scene)
    }

    /// Segments encoded since the last clear.
    pub fn segment_count(&self) -> usize {
        self.segments
    }
}

impl Surface for VelloSurface {
    fn create(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
            segments: 0,
        }
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.scene.reset();
        self.segments = 0;
    }

    fn clear(&mut self, background: InkColor) {
        self.scene.reset();
        self.segments = 0;
        let fill = Color::from_rgba8(background.r, background.g, background.b, 255);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            fill,
            None,
            &Rect::from_origin_size((0.0, 0.0), self.size),
        );
    }

    fn draw_line_segment(&mut self, segment: &StrokeSegment) {
        self.scene
            .stroke(&segment.stroke(), Affine::IDENTITY, segment.paint(), None, &segment.line());
        self.segments += 1;
    }

    fn to_image_bytes(&self, _format: ImageFormat, _quality: f64) -> SurfaceResult<Vec<u8>> {
        Err(SurfaceError::Unsupported(
            "Vello scenes need a GPU render target for readback".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PathRenderer, RenderFrame};
    use zenflow_core::{Path, StrokePoint};

    #[test]
    fn test_render_encodes_segments() {
        let path = Path::new(
            (0..5).map(|i| StrokePoint::new(i as f64 * 10.0, 20.0)).collect(),
            InkColor::default(),
            6.0,
            0.9,
        )
        .unwrap();
        let paths = vec![path];
        let mut surface = VelloSurface::create(Size::new(100.0, 100.0));
        let drawn = PathRenderer::new().render(&RenderFrame::new(&paths), &mut surface);
        assert_eq!(drawn, 4);
        assert_eq!(surface.segment_count(), 4);

        let _scene = surface.take_scene();
        assert_eq!(surface.segment_count(), 0);
    }

    #[test]
    fn test_export_needs_gpu() {
        let surface = VelloSurface::create(Size::new(10.0, 10.0));
        assert!(matches!(
            surface.to_image_bytes(ImageFormat::Png, 1.0),
            Err(SurfaceError::Unsupported(_))
        ));
    }
}
