//! Artworks: the unit of persistence.

use crate::path::Path;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared, immutable path list. Replay compares these by reference to detect
/// an artwork switch.
pub type PathList = Arc<[Path]>;

/// An artwork that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkDraft {
    pub title: String,
    pub paths: Vec<Path>,
}

impl ArtworkDraft {
    pub fn new(title: impl Into<String>, paths: Vec<Path>) -> Self {
        Self {
            title: title.into(),
            paths,
        }
    }

    /// Only drafts with at least one path may be persisted.
    pub fn is_saveable(&self) -> bool {
        !self.paths.is_empty()
    }
}

/// A stored artwork. The id and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub paths: PathList,
    pub created_at: DateTime<Utc>,
}

impl Artwork {
    /// Stamp a draft with a fresh id and creation time.
    pub fn from_draft(draft: ArtworkDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            paths: draft.paths.into(),
            created_at,
        }
    }

    /// Number of strokes.
    pub fn stroke_count(&self) -> usize {
        self.paths.len()
    }

    /// Total number of captured points across all strokes.
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }
}

/// Auto-generated title for a freshly drawn artwork.
pub fn default_title(now: DateTime<Local>) -> String {
    format!("Flow {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// Sort newest first. The sort is stable, so callers control tie order.
pub(crate) fn sort_newest_first(artworks: &mut [Artwork]) {
    artworks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::InkColor;
    use crate::path::StrokePoint;
    use chrono::TimeZone;

    fn path(points: usize) -> Path {
        let points = (0..points).map(|i| StrokePoint::new(i as f64, 0.0)).collect();
        Path::new(points, InkColor::default(), 5.0, 1.0).unwrap()
    }

    #[test]
    fn test_stats() {
        let art = Artwork::from_draft(ArtworkDraft::new("a", vec![path(3), path(4)]), Utc::now());
        assert_eq!(art.stroke_count(), 2);
        assert_eq!(art.point_count(), 7);
        assert!(!art.id.is_empty());
    }

    #[test]
    fn test_empty_draft_not_saveable() {
        assert!(!ArtworkDraft::new("empty", Vec::new()).is_saveable());
        assert!(ArtworkDraft::new("one", vec![path(1)]).is_saveable());
    }

    #[test]
    fn test_accepts_legacy_id_field() {
        let json = r##"{"_id":"abc","title":"t","paths":[],"createdAt":"2024-05-01T10:00:00Z"}"##;
        let art: Artwork = serde_json::from_str(json).unwrap();
        assert_eq!(art.id, "abc");
        assert_eq!(art.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_default_title() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        assert_eq!(default_title(now), "Flow 2024-03-09 07:05:02");
    }

    #[test]
    fn test_sort_newest_first_is_stable() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut list = vec![
            Artwork::from_draft(ArtworkDraft::new("old", vec![path(1)]), t0),
            Artwork::from_draft(ArtworkDraft::new("tie-a", vec![path(1)]), t1),
            Artwork::from_draft(ArtworkDraft::new("tie-b", vec![path(1)]), t1),
        ];
        sort_newest_first(&mut list);
        let titles: Vec<_> = list.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["tie-a", "tie-b", "old"]);
    }
}
