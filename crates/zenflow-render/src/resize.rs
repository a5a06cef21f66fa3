//! Keeps the drawable surface fitted to its container.

use crate::renderer::{PathRenderer, RenderFrame};
use crate::surface::Surface;
use kurbo::{Affine, Size};
use zenflow_core::CanvasConfig;

/// How stored coordinates map onto a resized surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CoordinateMode {
    /// Points are drawn at their stored pixel coordinates whatever the
    /// surface size.
    #[default]
    Absolute,
    /// Points captured on a `reference`-sized surface are scaled to the
    /// current size at render time.
    Rescale { reference: Size },
}

/// Sizing rule: fill the container width at a fixed aspect ratio, but never
/// taller than a fraction of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    /// Width / height.
    pub aspect_ratio: f64,
    pub max_viewport_fraction: f64,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self::from(&CanvasConfig::default())
    }
}

impl From<&CanvasConfig> for ResizePolicy {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            aspect_ratio: config.aspect_ratio,
            max_viewport_fraction: config.max_viewport_fraction,
        }
    }
}

impl ResizePolicy {
    /// Whole-pixel surface size for a container width and viewport height.
    pub fn target_size(&self, container_width: f64, viewport_height: f64) -> Size {
        let max_height = (viewport_height * self.max_viewport_fraction).max(0.0);
        let mut width = container_width.max(0.0);
        let mut height = width / self.aspect_ratio;
        if height > max_height {
            height = max_height;
            width = height * self.aspect_ratio;
        }
        Size::new(width.floor(), height.floor())
    }
}

/// Resizes the surface when its container changes and triggers a full
/// redraw.
#[derive(Debug, Clone)]
pub struct CanvasResizeCoordinator {
    policy: ResizePolicy,
    mode: CoordinateMode,
    size: Size,
}

impl CanvasResizeCoordinator {
    pub fn new(policy: ResizePolicy, initial: Size) -> Self {
        Self {
            policy,
            mode: CoordinateMode::Absolute,
            size: initial,
        }
    }

    pub fn with_mode(mut self, mode: CoordinateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// Current surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Record new container dimensions. Returns the new surface size if it
    /// changed.
    pub fn observe(&mut self, container_width: f64, viewport_height: f64) -> Option<Size> {
        let target = self.policy.target_size(container_width, viewport_height);
        if target == self.size {
            return None;
        }
        log::info!(
            "Canvas resized from {}x{} to {}x{}",
            self.size.width,
            self.size.height,
            target.width,
            target.height
        );
        self.size = target;
        Some(target)
    }

    /// Stored-to-surface coordinate mapping for the current size.
    pub fn transform(&self) -> Affine {
        match self.mode {
            CoordinateMode::Absolute => Affine::IDENTITY,
            CoordinateMode::Rescale { reference } => {
                if reference.width <= 0.0 || reference.height <= 0.0 {
                    return Affine::IDENTITY;
                }
                Affine::scale_non_uniform(self.size.width / reference.width, self.size.height / reference.height)
            }
        }
    }

    /// Observe the container and, on a change, resize `surface` and redraw
    /// `frame` in full. Returns whether a redraw happened.
    pub fn resize_and_redraw<S>(
        &mut self,
        container_width: f64,
        viewport_height: f64,
        surface: &mut S,
        renderer: &mut PathRenderer,
        frame: RenderFrame<'_>,
    ) -> bool
    where
        S: Surface + ?Sized,
    {
        let Some(size) = self.observe(container_width, viewport_height) else {
            return false;
        };
        surface.resize(size);
        renderer.render(&frame.with_transform(self.transform()), surface);
        true
    }
}
