//! File-based artwork store.

use super::{ArtworkStore, BoxFuture, StorageError, StorageResult};
use crate::artwork::{Artwork, ArtworkDraft, sort_newest_first};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

/// Stores each artwork as a JSON file in a directory.
#[derive(Debug)]
pub struct FileArtworkStore {
    base_path: PathBuf,
}

impl FileArtworkStore {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Open the store in the platform data directory
    /// (e.g. `~/.local/share/zenflow/artworks/`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("zenflow").join("artworks"))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn artwork_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    fn json_files(&self) -> StorageResult<Vec<PathBuf>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;
        Ok(entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect())
    }

    /// Find the file holding `id`.
    ///
    /// Saved artworks live at `<id>.json`. Imported files may carry an id
    /// that differs from their file name, so those are found by scanning.
    fn locate(&self, id: &str) -> StorageResult<Option<PathBuf>> {
        let path = self.artwork_path(id);
        if path.exists() {
            return Ok(Some(path));
        }
        for path in self.json_files()? {
            match Self::read_artwork(&path) {
                Ok(artwork) if artwork.id == id => return Ok(Some(path)),
                Ok(_) => {}
                Err(e) => log::debug!("Ignoring unreadable artwork while looking up {}: {}", id, e),
            }
        }
        Ok(None)
    }

    fn read_artwork(path: &std::path::Path) -> StorageResult<Artwork> {
        let json = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&json)
            .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

impl ArtworkStore for FileArtworkStore {
    fn save(&self, draft: ArtworkDraft) -> BoxFuture<'_, StorageResult<Artwork>> {
        Box::pin(async move {
            let artwork = Artwork::from_draft(draft, Utc::now());
            let path = self.artwork_path(&artwork.id);
            let json = serde_json::to_string_pretty(&artwork)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
            log::info!("Saved artwork {} to {}", artwork.id, path.display());
            Ok(artwork)
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Artwork>>> {
        Box::pin(async move {
            let mut artworks = Vec::new();
            for path in self.json_files()? {
                match Self::read_artwork(&path) {
                    Ok(artwork) => artworks.push(artwork),
                    Err(e) => log::warn!("Skipping unreadable artwork: {}", e),
                }
            }

            // Directory order is arbitrary; ids break timestamp ties
            artworks.sort_by(|a, b| a.id.cmp(&b.id));
            sort_newest_first(&mut artworks);
            Ok(artworks)
        })
    }

    fn get(&self, id: &str) -> BoxFuture<'_, StorageResult<Artwork>> {
        let id = id.to_string();
        Box::pin(async move {
            let Some(path) = self.locate(&id)? else {
                return Err(StorageError::NotFound(id));
            };
            Self::read_artwork(&path)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let Some(path) = self.locate(&id)? else {
                return Err(StorageError::NotFound(id));
            };
            fs::remove_file(&path)
                .map_err(|e| StorageError::Io(format!("Failed to delete {}: {}", path.display(), e)))?;
            log::info!("Deleted artwork {}", id);
            Ok(())
        })
    }
}
