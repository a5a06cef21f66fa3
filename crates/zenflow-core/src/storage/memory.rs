//! In-memory artwork store.

use super::{ArtworkStore, BoxFuture, StorageError, StorageResult};
use crate::artwork::{Artwork, ArtworkDraft, sort_newest_first};
use chrono::Utc;
use std::sync::RwLock;

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryArtworkStore {
    /// Artworks in save order.
    artworks: RwLock<Vec<Artwork>>,
}

impl MemoryArtworkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl ArtworkStore for MemoryArtworkStore {
    fn save(&self, draft: ArtworkDraft) -> BoxFuture<'_, StorageResult<Artwork>> {
        Box::pin(async move {
            let artwork = Artwork::from_draft(draft, Utc::now());
            self.artworks.write().map_err(lock_error)?.push(artwork.clone());
            log::info!("Saved artwork {} ({} strokes)", artwork.id, artwork.stroke_count());
            Ok(artwork)
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<Artwork>>> {
        Box::pin(async move {
            let artworks = self.artworks.read().map_err(lock_error)?;
            // Reverse first so equal timestamps list the later save first
            let mut list: Vec<Artwork> = artworks.iter().rev().cloned().collect();
            sort_newest_first(&mut list);
            Ok(list)
        })
    }

    fn get(&self, id: &str) -> BoxFuture<'_, StorageResult<Artwork>> {
        let id = id.to_string();
        Box::pin(async move {
            let artworks = self.artworks.read().map_err(lock_error)?;
            artworks
                .iter()
                .find(|artwork| artwork.id == id)
                .cloned()
                .ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut artworks = self.artworks.write().map_err(lock_error)?;
            let index = artworks
                .iter()
                .position(|artwork| artwork.id == id)
                .ok_or_else(|| StorageError::NotFound(id.clone()))?;
            artworks.remove(index);
            log::info!("Deleted artwork {}", id);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::InkColor;
    use crate::path::{Path, StrokePoint};
    use crate::storage::block_on;
    use kurbo::Point;

    fn draft(title: &str) -> ArtworkDraft {
        let points = vec![
            StrokePoint::weighted(Point::new(1.0, 2.0), 9.0),
            StrokePoint::new(3.5, 4.25),
            StrokePoint::weighted(Point::new(7.0, 8.0), 1.5),
        ];
        let path = Path::new(points, InkColor::new(0xAA, 0x96, 0xDA), 6.0, 0.5).unwrap();
        ArtworkDraft::new(title, vec![path.clone(), path])
    }

    #[test]
    fn test_save_assigns_id_and_time() {
        let store = MemoryArtworkStore::new();
        let saved = block_on(store.save(draft("first"))).unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(saved.title, "first");
    }

    #[test]
    fn test_round_trip_preserves_paths() {
        let store = MemoryArtworkStore::new();
        let original = draft("art");
        let saved = block_on(store.save(original.clone())).unwrap();
        let loaded = block_on(store.get(&saved.id)).unwrap();
        assert_eq!(&loaded.paths[..], &original.paths[..]);
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryArtworkStore::new();
        for title in ["one", "two", "three"] {
            block_on(store.save(draft(title))).unwrap();
        }
        let list = block_on(store.list()).unwrap();
        let titles: Vec<_> = list.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["three", "two", "one"]);
    }

    #[test]
    fn test_delete() {
        let store = MemoryArtworkStore::new();
        let saved = block_on(store.save(draft("gone"))).unwrap();
        block_on(store.delete(&saved.id)).unwrap();
        assert!(matches!(block_on(store.get(&saved.id)), Err(StorageError::NotFound(_))));
        assert!(matches!(block_on(store.delete(&saved.id)), Err(StorageError::NotFound(_))));
    }
}
