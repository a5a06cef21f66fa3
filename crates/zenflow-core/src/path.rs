//! Committed ink paths and their points.

use crate::color::InkColor;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Opacity used for paths stored without one.
pub const DEFAULT_INK_OPACITY: f64 = 0.9;

fn default_opacity() -> f64 {
    DEFAULT_INK_OPACITY
}

/// A captured pointer position with the stroke weight frozen at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Absent on points loaded from older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, weight: None }
    }

    pub fn weighted(position: Point, weight: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            weight: Some(weight),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The line width at this point, falling back to the path's base size.
    pub fn weight_or(&self, brush_size: f64) -> f64 {
        self.weight.unwrap_or(brush_size)
    }
}

/// One continuous committed stroke.
///
/// Paths are immutable once committed: there are no setters, and the point
/// list keeps capture order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub(crate) points: Vec<StrokePoint>,
    pub(crate) color: InkColor,
    pub(crate) brush_size: f64,
    #[serde(default = "default_opacity")]
    pub(crate) opacity: f64,
}

impl Path {
    /// Freeze a point buffer into a path. Returns `None` for an empty buffer.
    pub fn new(points: Vec<StrokePoint>, color: InkColor, brush_size: f64, opacity: f64) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            color,
            brush_size,
            opacity,
        })
    }

    /// An empty copy carrying this path's style, used while replaying.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            points: Vec::with_capacity(self.points.len()),
            color: self.color,
            brush_size: self.brush_size,
            opacity: self.opacity,
        }
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
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

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of line segments the renderer draws for this path.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Axis-aligned bounds of the point positions, ignoring stroke width.
    pub fn bounds(&self) -> Rect {
        let mut points = self.points.iter().map(StrokePoint::position);
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p))
    }
}

/// The stroke currently being drawn, borrowed for rendering.
#[derive(Debug, Clone, Copy)]
pub struct TransientPath<'a> {
    pub points: &'a [StrokePoint],
    pub color: InkColor,
    pub brush_size: f64,
    pub opacity: f64,
}
