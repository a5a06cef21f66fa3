//! Application commands, run against an artwork store.

use chrono::{Local, Utc};
use kurbo::{Point, Size};
use std::io::Write;
use std::path::{Path as FsPath, PathBuf};
use std::time::Instant;
use thiserror::Error;
use zenflow_core::{
    Artwork, ArtworkStore, ConfigError, DrawingSession, FileArtworkStore, Gallery, PointerEvent, ReplayScheduler,
    SaveError, StorageError, ZenflowConfig, default_title,
};
use zenflow_render::{
    ImageFormat, PaperGrain, PathRenderer, RasterSurface, RenderFrame, Surface, SurfaceError, export_file_name,
};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("IO error on {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AppError {
    fn io(path: &FsPath, e: impl std::fmt::Display) -> Self {
        AppError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

/// Result type for application commands.
pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub settings: ZenflowConfig,
    /// Overrides the configured store directory.
    pub store_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load settings from an optional JSON file.
    pub fn load(config_path: Option<&FsPath>, store_dir: Option<PathBuf>) -> AppResult<Self> {
        let settings = match config_path {
            Some(path) => ZenflowConfig::load(path)?,
            None => ZenflowConfig::default(),
        };
        Ok(Self { settings, store_dir })
    }

    /// Open the file store: CLI override, then config, then platform default.
    pub fn open_store(&self) -> AppResult<FileArtworkStore> {
        let dir = self.store_dir.clone().or_else(|| self.settings.store_dir.clone());
        let store = match dir {
            Some(dir) => FileArtworkStore::new(dir)?,
            None => FileArtworkStore::default_location()?,
        };
        log::debug!("Using artwork store at {}", store.base_path().display());
        Ok(store)
    }

    fn canvas_size(&self) -> Size {
        let canvas = &self.settings.canvas;
        Size::new(canvas.width as f64, canvas.height as f64)
    }
}

/// Options for `render`.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output: Option<PathBuf>,
    pub format: ImageFormat,
    pub quality: f64,
    pub grain: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output: None,
            format: ImageFormat::Jpeg,
            quality: 0.95,
            grain: false,
        }
    }
}

/// Runs commands against one store.
pub struct App<S: ArtworkStore> {
    config: AppConfig,
    store: S,
    gallery: Gallery,
}

impl<S: ArtworkStore> App<S> {
    pub fn new(config: AppConfig, store: S) -> Self {
        Self {
            config,
            store,
            gallery: Gallery::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Write the gallery, newest first, as a table or as JSON.
    pub async fn list(&mut self, out: &mut dyn Write, json: bool) -> AppResult<()> {
        self.gallery.refresh(&self.store).await?;
        let stdout_error = |e: std::io::Error| AppError::io(FsPath::new("<output>"), e);

        if json {
            let text = serde_json::to_string_pretty(self.gallery.artworks())
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            writeln!(out, "{}", text).map_err(stdout_error)?;
            return Ok(());
        }

        if self.gallery.is_empty() {
            writeln!(out, "No artworks yet").map_err(stdout_error)?;
            return Ok(());
        }
        for artwork in self.gallery.artworks() {
            writeln!(
                out,
                "{}  {:<32}  {:>4} strokes  {:>6} points  {}",
                artwork.id,
                artwork.title,
                artwork.stroke_count(),
                artwork.point_count(),
                artwork.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            )
            .map_err(stdout_error)?;
        }
        Ok(())
    }

    /// Render a stored artwork to an image file. Returns the written path.
    pub async fn render(&mut self, id: &str, options: &RenderOptions) -> AppResult<PathBuf> {
        let artwork = self.store.get(id).await?;
        let surface = self.draw(&artwork.paths, options.grain);
        let bytes = surface.to_image_bytes(options.format, options.quality)?;

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_file_name(&artwork.title, Utc::now(), options.format)));
        std::fs::write(&output, bytes).map_err(|e| AppError::io(&output, e))?;
        log::info!("Exported {} to {}", artwork.id, output.display());
        Ok(output)
    }

    /// Replay a stored artwork against a simulated clock, writing every
    /// `every`-th frame (and the last) as PNG. Returns the frame count written.
    pub async fn replay(&mut self, id: &str, frames_dir: &FsPath, every: usize) -> AppResult<usize> {
        if every == 0 {
            return Err(AppError::InvalidArgument("--every must be at least 1".to_string()));
        }
        let artwork = self.store.get(id).await?;
        std::fs::create_dir_all(frames_dir).map_err(|e| AppError::io(frames_dir, e))?;

        let delay = self.config.settings.replay.point_delay();
        let mut scheduler = ReplayScheduler::new(delay);
        let mut renderer = PathRenderer::new();
        let mut surface = RasterSurface::create(self.config.canvas_size());
        let background = self.config.settings.canvas.background;

        let mut now = Instant::now();
        scheduler.set_source(Some(artwork.paths.clone()), now);
        log::info!("Replaying {} ({} points)", artwork.id, artwork.point_count());

        let mut tick = 0;
        let mut written = 0;
        while scheduler.is_replaying() {
            now += delay;
            scheduler.advance(now);
            tick += 1;
            if tick % every == 0 || !scheduler.is_replaying() {
                let frame = RenderFrame::new(scheduler.revealed()).with_background(background);
                renderer.render(&frame, &mut surface);
                let path = frames_dir.join(format!("frame-{:05}.png", written));
                let bytes = surface.to_image_bytes(ImageFormat::Png, 1.0)?;
                std::fs::write(&path, bytes).map_err(|e| AppError::io(&path, e))?;
                written += 1;
            }
        }
        log::info!("Replay complete: {} frames in {}", written, frames_dir.display());
        Ok(written)
    }

    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        self.gallery.refresh(&self.store).await?;
        self.gallery.delete(&self.store, id).await?;
        Ok(())
    }

    /// Draw a synthetic wave stroke through a drawing session and save it.
    pub async fn demo(&mut self, title: Option<String>) -> AppResult<Artwork> {
        let bounds = self.config.canvas_size();
        let mut session = DrawingSession::new(bounds, self.config.settings.brush);
        for (i, stroke) in demo_strokes(bounds).into_iter().enumerate() {
            session.tool_mut().set_color(zenflow_core::PALETTE[i % zenflow_core::PALETTE.len()]);
            feed_stroke(&mut session, &stroke);
        }
        let title = title.unwrap_or_else(|| default_title(Local::now()));
        Ok(session.save(&self.store, title).await?)
    }

    fn draw(&self, paths: &[zenflow_core::Path], grain: bool) -> RasterSurface {
        let mut surface = RasterSurface::create(self.config.canvas_size());
        if grain {
            surface = surface.with_grain(PaperGrain::default());
        }
        let frame = RenderFrame::new(paths).with_background(self.config.settings.canvas.background);
        PathRenderer::new().render(&frame, &mut surface);
        surface
    }
}

fn feed_stroke(session: &mut DrawingSession, points: &[Point]) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    session.handle(&PointerEvent::Down { position: first });
    for &position in rest {
        session.handle(&PointerEvent::Move { position });
    }
    let last = rest.last().copied().unwrap_or(first);
    session.handle(&PointerEvent::Up { position: last });
}

/// Two sine waves: one drawn slowly then speeding up, one fast throughout.
fn demo_strokes(bounds: Size) -> Vec<Vec<Point>> {
    let margin = bounds.width * 0.1;
    let span = bounds.width - 2.0 * margin;
    let wave = |centre: f64, amplitude: f64, steps: usize, accelerate: bool| -> Vec<Point> {
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                let t = if accelerate { t * t } else { t };
                let x = margin + span * t;
                let y = centre + amplitude * (t * std::f64::consts::TAU * 2.0).sin();
                Point::new(x, y)
            })
            .collect()
    };
    vec![
        wave(bounds.height * 0.35, bounds.height * 0.1, 120, true),
        wave(bounds.height * 0.65, bounds.height * 0.08, 40, false),
    ]
}
