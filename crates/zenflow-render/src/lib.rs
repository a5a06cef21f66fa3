//! Zen Flow Render Library
//!
//! Drawable surfaces, the immediate-mode path renderer and canvas sizing.
//! The raster surface exports PNG and JPEG; a Vello scene surface is
//! available with the `vello-surface` feature.

mod export;
mod raster;
mod renderer;
mod resize;
mod segments;
mod surface;

#[cfg(feature = "vello-surface")]
mod vello_impl;

pub use export::export_file_name;
pub use raster::{PaperGrain, RasterSurface};
pub use renderer::{PathRenderer, RenderFrame};
pub use resize::{CanvasResizeCoordinator, CoordinateMode, ResizePolicy};
pub use segments::{SegmentSurface, SurfaceOp};
pub use surface::{ImageFormat, StrokeSegment, Surface, SurfaceError, SurfaceResult};

#[cfg(feature = "vello-surface")]
pub use vello_impl::VelloSurface;
