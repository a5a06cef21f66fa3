//! Stroke capture: pointer events in, committed paths out.

use crate::brush::{VelocityWindow, stroke_weight};
use crate::config::BrushConfig;
use crate::input::{PointerEvent, within_bounds};
use crate::path::{Path, StrokePoint, TransientPath};
use crate::tools::ToolSettings;
use kurbo::{Point, Size};

/// State of the recorder.
#[derive(Debug, Clone, Default)]
pub enum RecorderState {
    /// Waiting for a pointer-down on the canvas.
    #[default]
    Idle,
    /// A stroke is in progress.
    Drawing {
        /// Last accepted pointer position.
        previous: Point,
        /// Recent per-event velocities.
        window: VelocityWindow,
        /// Points captured so far.
        buffer: Vec<StrokePoint>,
    },
}

/// Turns pointer events into immutable [`Path`]s.
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    state: RecorderState,
    bounds: Size,
    brush: BrushConfig,
}

impl StrokeRecorder {
    pub fn new(bounds: Size, brush: BrushConfig) -> Self {
        Self {
            state: RecorderState::Idle,
            bounds,
            brush,
        }
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, RecorderState::Drawing { .. })
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Update the canvas bounds, e.g. after the surface was resized.
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: BrushConfig) {
        self.brush = brush;
    }

    /// Points captured for the stroke in progress.
    pub fn buffer(&self) -> &[StrokePoint] {
        match &self.state {
            RecorderState::Drawing { buffer, .. } => buffer,
            RecorderState::Idle => &[],
        }
    }

    /// The in-progress stroke styled with the live tool, if any.
    pub fn transient<'a>(&'a self, tool: &ToolSettings) -> Option<TransientPath<'a>> {
        let points = self.buffer();
        if points.is_empty() {
            return None;
        }
        Some(TransientPath {
            points,
            color: tool.color(),
            brush_size: tool.brush_size(),
            opacity: tool.opacity(),
        })
    }

    /// Feed one event. Returns the committed path on a pointer-up that ends a
    /// non-empty stroke.
    pub fn handle(&mut self, event: &PointerEvent, tool: &ToolSettings) -> Option<Path> {
        match *event {
            PointerEvent::Down { position } => {
                self.pointer_down(position, tool);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position, tool);
                None
            }
            PointerEvent::Up { .. } => self.pointer_up(tool),
        }
    }

    /// Start a stroke. Ignored outside the canvas. A pointer-down while
    /// already drawing restarts the stroke.
    pub fn pointer_down(&mut self, position: Point, tool: &ToolSettings) -> bool {
        if !within_bounds(position, self.bounds) {
            return false;
        }
        if self.is_drawing() {
            log::debug!("Pointer down while drawing, restarting stroke");
        }

        let window = VelocityWindow::seeded(0.0);
        let params = self.brush.params(tool.brush_size());
        let sample = stroke_weight(position, position, &window, &params);

        self.state = RecorderState::Drawing {
            previous: position,
            window,
            buffer: vec![StrokePoint::weighted(position, sample.weight)],
        };
        true
    }

    /// Extend the stroke. Returns whether a point was appended.
    pub fn pointer_move(&mut self, position: Point, tool: &ToolSettings) -> bool {
        let RecorderState::Drawing { previous, window, buffer } = &mut self.state else {
            return false;
        };
        // Leaving the canvas pauses the stroke without ending it
        if !within_bounds(position, self.bounds) {
            return false;
        }

        let params = self.brush.params(tool.brush_size());
        let sample = stroke_weight(position, *previous, window, &params);
        buffer.push(StrokePoint::weighted(position, sample.weight));
        *previous = position;
        window.push(sample.velocity);
        true
    }

    /// End the stroke, moving the buffer into a path styled by `tool`.
    pub fn pointer_up(&mut self, tool: &ToolSettings) -> Option<Path> {
        let RecorderState::Drawing { buffer, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let path = Path::new(buffer, tool.color(), tool.brush_size(), tool.opacity())?;
        log::debug!("Committed stroke with {} points", path.len());
        Some(path)
    }

    /// Abandon the stroke in progress without committing it.
    pub fn cancel(&mut self) {
        self.state = RecorderState::Idle;
    }
}
