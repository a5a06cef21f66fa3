//! Gallery: the newest-first list of stored artworks and the one selected
//! for replay.

use crate::artwork::{Artwork, ArtworkDraft, PathList};
use crate::session::SaveError;
use crate::storage::{ArtworkStore, StorageResult};

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    artworks: Vec<Artwork>,
    active: Option<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the list from the store.
    ///
    /// The active selection survives only if its artwork still exists.
    pub async fn refresh<S>(&mut self, store: &S) -> StorageResult<()>
    where
        S: ArtworkStore + ?Sized,
    {
        self.artworks = store.list().await?;
        if self.active().is_none() {
            self.active = None;
        }
        log::debug!("Gallery refreshed with {} artworks", self.artworks.len());
        Ok(())
    }

    /// Artworks, newest first.
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == id)
    }

    /// Save a draft and put the stored artwork at the front.
    pub async fn create<S>(&mut self, store: &S, draft: ArtworkDraft) -> Result<&Artwork, SaveError>
    where
        S: ArtworkStore + ?Sized,
    {
        if !draft.is_saveable() {
            return Err(SaveError::NothingToSave);
        }
        let artwork = store.save(draft).await?;
        self.artworks.insert(0, artwork);
        Ok(&self.artworks[0])
    }

    /// Delete from the store, then from the local list.
    ///
    /// On failure the local list is left as it was.
    pub async fn delete<S>(&mut self, store: &S, id: &str) -> StorageResult<()>
    where
        S: ArtworkStore + ?Sized,
    {
        store.delete(id).await?;
        self.artworks.retain(|a| a.id != id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    /// Select an artwork for replay. Unknown ids clear the selection.
    pub fn set_active(&mut self, id: Option<&str>) -> Option<&Artwork> {
        self.active = id.filter(|id| self.get(id).is_some()).map(str::to_string);
        self.active()
    }

    pub fn active(&self) -> Option<&Artwork> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    /// Path list of the active artwork, shared with the stored copy.
    pub fn active_paths(&self) -> Option<PathList> {
        self.active().map(|a| a.paths.clone())
    }
}
