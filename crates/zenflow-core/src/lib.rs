//! Zen Flow Core Library
//!
//! Platform-agnostic stroke capture, brush physics, replay and artwork
//! persistence for the Zen Flow drawing canvas.

pub mod artwork;
pub mod brush;
pub mod color;
pub mod config;
pub mod gallery;
pub mod input;
pub mod path;
pub mod recorder;
pub mod replay;
pub mod session;
pub mod storage;
pub mod tools;

pub use artwork::{Artwork, ArtworkDraft, PathList, default_title};
pub use brush::{BrushParams, BrushSample, VelocityWindow, stroke_weight};
pub use color::{BACKGROUND_COLOR, ColorParseError, InkColor, PALETTE};
pub use config::{BrushConfig, CanvasConfig, ConfigError, ReplayConfig, ZenflowConfig};
pub use gallery::Gallery;
pub use input::PointerEvent;
pub use path::{Path, StrokePoint, TransientPath};
pub use recorder::{RecorderState, StrokeRecorder};
pub use replay::{ReplayCursor, ReplayScheduler, ReplayState};
pub use session::{DrawingSession, SaveError};
pub use storage::{ArtworkStore, FileArtworkStore, MemoryArtworkStore, StorageError, StorageResult};
pub use tools::ToolSettings;
