//! Pointer input fed to the stroke recorder.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Pointer events in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position } | PointerEvent::Move { position } | PointerEvent::Up { position } => {
                position
            }
        }
    }
}

/// Whether `point` lies on the canvas. Edges count as inside.
pub fn within_bounds(point: Point, bounds: Size) -> bool {
    point.x >= 0.0 && point.x <= bounds.width && point.y >= 0.0 && point.y <= bounds.height
}
