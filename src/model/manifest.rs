//! JSON photo manifest, the demo binary's stand-in for a paginated
//! search API.
//!
//! The real data-fetching collaborator deduplicates photos by id before
//! they reach the engine; the manifest does the same at load time so
//! `page()` always yields unique ids.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::error::ManifestError;
use super::photo::{Photo, PhotoId};

/// Raw manifest record as it appears on disk.
///
/// Display URLs and alt text are presentation concerns; they are accepted
/// in the file but not carried into the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRecord {
    /// Stable photo id.
    pub id: PhotoId,
    /// Intrinsic width in pixels.
    pub width: usize,
    /// Intrinsic height in pixels.
    pub height: usize,
    /// Optional display URL, ignored by the engine.
    #[serde(default)]
    pub url: Option<String>,
    /// Optional alt text, ignored by the engine.
    #[serde(default)]
    pub alt: Option<String>,
}

/// An ordered, deduplicated photo collection with fixed-size paging.
#[derive(Debug, Clone)]
pub struct PhotoManifest {
    photos: Vec<Photo>,
}

impl PhotoManifest {
    /// Load a manifest from a JSON file containing an array of records.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let records: Vec<PhotoRecord> = serde_json::from_str(json)?;

        let mut photos = Vec::with_capacity(records.len());
        let mut seen = std::collections::HashSet::new();
        for record in records {
            if !seen.insert(record.id) {
                warn!(id = %record.id, "duplicate photo id in manifest, keeping first");
                continue;
            }
            photos.push(Photo::new(record.id, record.width, record.height)?);
        }

        Ok(Self { photos })
    }

    /// Photos belonging to the given zero-based page. Empty past the end.
    pub fn page(&self, page: usize, per_page: usize) -> &[Photo] {
        if per_page == 0 {
            return &[];
        }
        let start = page.saturating_mul(per_page).min(self.photos.len());
        let end = start.saturating_add(per_page).min(self.photos.len());
        &self.photos[start..end]
    }

    /// Number of pages at the given page size.
    pub fn page_count(&self, per_page: usize) -> usize {
        if per_page == 0 {
            0
        } else {
            self.photos.len().div_ceil(per_page)
        }
    }

    /// Total number of photos.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// True if the manifest holds no photos.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
