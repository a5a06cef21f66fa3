//! Drawing session: the state behind one canvas.

use crate::artwork::{Artwork, ArtworkDraft};
use crate::config::BrushConfig;
use crate::input::PointerEvent;
use crate::path::{Path, TransientPath};
use crate::recorder::StrokeRecorder;
use crate::storage::{ArtworkStore, StorageError};
use crate::tools::ToolSettings;
use kurbo::Size;
use thiserror::Error;

/// Errors from saving an artwork.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The artwork has no paths. Raised before the store is contacted.
    #[error("Nothing to save: draw something first")]
    NothingToSave,
    #[error(transparent)]
    Store(#[from] StorageError),
}

/// Committed paths, the live tool and the stroke recorder for one canvas.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    recorder: StrokeRecorder,
    paths: Vec<Path>,
    tool: ToolSettings,
}

impl DrawingSession {
    pub fn new(bounds: Size, brush: BrushConfig) -> Self {
        Self {
            recorder: StrokeRecorder::new(bounds, brush),
            paths: Vec::new(),
            tool: ToolSettings::default(),
        }
    }

    /// Feed a pointer event. Returns true when it committed a path.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        match self.recorder.handle(event, &self.tool) {
            Some(path) => {
                self.paths.push(path);
                true
            }
            None => false,
        }
    }

    /// Committed paths in drawing order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// The stroke in progress, styled by the live tool.
    pub fn transient(&self) -> Option<TransientPath<'_>> {
        self.recorder.transient(&self.tool)
    }

    pub fn tool(&self) -> &ToolSettings {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolSettings {
        &mut self.tool
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    pub fn is_drawing(&self) -> bool {
        self.recorder.is_drawing()
    }

    pub fn set_bounds(&mut self, bounds: Size) {
        self.recorder.set_bounds(bounds);
    }

    /// Drop all committed paths and any stroke in progress.
    pub fn clear(&mut self) {
        self.recorder.cancel();
        self.paths.clear();
    }

    /// Snapshot the committed paths as a draft.
    pub fn to_draft(&self, title: impl Into<String>) -> ArtworkDraft {
        ArtworkDraft::new(title, self.paths.clone())
    }

    /// Persist the committed paths under `title`.
    ///
    /// An empty session is rejected without touching the store. The session
    /// itself is never modified, whatever the store returns.
    pub async fn save<S>(&self, store: &S, title: impl Into<String>) -> Result<Artwork, SaveError>
    where
        S: ArtworkStore + ?Sized,
    {
        let draft = self.to_draft(title);
        if !draft.is_saveable() {
            log::info!("Refusing to save an empty artwork");
            return Err(SaveError::NothingToSave);
        }
        Ok(store.save(draft).await?)
    }
}
