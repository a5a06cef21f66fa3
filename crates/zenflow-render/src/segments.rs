//! Vector surface that records draw calls.

use crate::raster::RasterSurface;
use crate::surface::{ImageFormat, StrokeSegment, Surface, SurfaceResult};
use kurbo::Size;
use zenflow_core::InkColor;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Clear(InkColor),
    Segment(StrokeSegment),
}

/// Records what was drawn since the last clear, for comparing frames
/// geometrically instead of by pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSurface {
    size: Size,
    ops: Vec<SurfaceOp>,
}

impl SegmentSurface {
    /// Draw calls since the last clear, starting with that clear.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn background(&self) -> Option<InkColor> {
        match self.ops.first() {
            Some(SurfaceOp::Clear(color)) => Some(*color),
            _ => None,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &StrokeSegment> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Segment(segment) => Some(segment),
            SurfaceOp::Clear(_) => None,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Replay the recording onto another surface.
    pub fn replay_onto<S>(&self, target: &mut S)
    where
        S: Surface + ?Sized,
    {
        for op in &self.ops {
            match op {
                SurfaceOp::Clear(color) => target.clear(*color),
                SurfaceOp::Segment(segment) => target.draw_line_segment(segment),
            }
        }
    }
}

impl Surface for SegmentSurface {
    fn create(size: Size) -> Self {
        Self { size, ops: Vec::new() }
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.ops.clear();
    }

    fn clear(&mut self, background: InkColor) {
        self.ops.clear();
        self.ops.push(SurfaceOp::Clear(background));
    }

    fn draw_line_segment(&mut self, segment: &StrokeSegment) {
        self.ops.push(SurfaceOp::Segment(*segment));
    }

    /// Rasterises the recording at the surface size.
    fn to_image_bytes(&self, format: ImageFormat, quality: f64) -> SurfaceResult<Vec<u8>> {
        let mut raster = RasterSurface::create(self.size);
        self.replay_onto(&mut raster);
        raster.to_image_bytes(format, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn segment(x: f64) -> StrokeSegment {
        StrokeSegment::new(Point::new(x, 0.0), Point::new(x + 1.0, 0.0), InkColor::default(), 0.9, 3.0)
    }

    #[test]
    fn test_clear_starts_new_recording() {
        let mut surface = SegmentSurface::create(Size::new(10.0, 10.0));
        surface.clear(InkColor::new(1, 2, 3));
        surface.draw_line_segment(&segment(0.0));
        surface.clear(InkColor::new(4, 5, 6));
        surface.draw_line_segment(&segment(2.0));

        assert_eq!(surface.ops().len(), 2);
        assert_eq!(surface.background(), Some(InkColor::new(4, 5, 6)));
        assert_eq!(surface.segments().next(), Some(&segment(2.0)));
    }

    #[test]
    fn test_replay_onto_raster_matches_direct_drawing() {
        let size = Size::new(12.0, 8.0);
        let mut recorded = SegmentSurface::create(size);
        let mut direct = RasterSurface::create(size);
        let surfaces: [&mut dyn Surface; 2] = [&mut recorded, &mut direct];
        for surface in surfaces {
            surface.clear(InkColor::new(20, 20, 30));
            surface.draw_line_segment(&segment(2.0));
        }

        let mut replayed = RasterSurface::create(size);
        recorded.replay_onto(&mut replayed);
        assert_eq!(replayed.pixels(), direct.pixels());
    }
}
