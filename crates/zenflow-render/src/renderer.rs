//! Immediate-mode path renderer.

use crate::surface::{StrokeSegment, Surface};
use kurbo::Affine;
use zenflow_core::color::BACKGROUND_COLOR;
use zenflow_core::{InkColor, Path, StrokePoint, TransientPath};

/// Everything drawn in one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Committed paths in drawing order.
    pub paths: &'a [Path],
    /// The stroke in progress, drawn on top.
    pub transient: Option<TransientPath<'a>>,
    /// Maps stored coordinates to surface pixels.
    pub transform: Affine,
    pub background: InkColor,
}

impl<'a> RenderFrame<'a> {
    pub fn new(paths: &'a [Path]) -> Self {
        Self {
            paths,
            transient: None,
            transform: Affine::IDENTITY,
            background: BACKGROUND_COLOR,
        }
    }

    pub fn with_transient(mut self, transient: Option<TransientPath<'a>>) -> Self {
        self.transient = transient;
        self
    }

    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_background(mut self, background: InkColor) -> Self {
        self.background = background;
        self
    }

    /// Segments of this frame in paint order.
    pub fn segments(&self) -> impl Iterator<Item = StrokeSegment> + '_ {
        let transform = self.transform;
        let committed = self
            .paths
            .iter()
            .flat_map(move |path| stroke_segments(path.points(), path.color(), path.brush_size(), path.opacity(), transform));
        let transient = self
            .transient
            .into_iter()
            .flat_map(move |t| stroke_segments(t.points, t.color, t.brush_size, t.opacity, transform));
        committed.chain(transient)
    }
}

/// One segment per consecutive point pair, sized by the first point's weight.
fn stroke_segments(
    points: &[StrokePoint],
    color: InkColor,
    brush_size: f64,
    opacity: f64,
    transform: Affine,
) -> impl Iterator<Item = StrokeSegment> + '_ {
    let width_scale = transform.determinant().abs().sqrt();
    points.windows(2).map(move |pair| {
        StrokeSegment::new(
            transform * pair[0].position(),
            transform * pair[1].position(),
            color,
            opacity,
            pair[0].weight_or(brush_size) * width_scale,
        )
    })
}

/// Redraws a whole frame on every call. Output depends only on the frame.
#[derive(Debug, Default)]
pub struct PathRenderer {
    frames: u64,
    last_segment_count: usize,
}

impl PathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear `surface` and draw every segment of `frame`.
    pub fn render<S>(&mut self, frame: &RenderFrame<'_>, surface: &mut S) -> usize
    where
        S: Surface + ?Sized,
    {
        surface.clear(frame.background);
        let mut count = 0;
        for segment in frame.segments() {
            surface.draw_line_segment(&segment);
            count += 1;
        }
        self.frames += 1;
        self.last_segment_count = count;
        log::debug!("Rendered frame {} with {} segments", self.frames, count);
        count
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_segment_count(&self) -> usize {
        self.last_segment_count
    }
}
