//! Photo gallery loaded from a JSON manifest
//!
//! The manifest is a single object with a `photos` array:
//!
//! ```json
//! { "photos": [ { "id": "1", "urls": ["..."], "title": "...",
//!                 "description": "...", "category": "...", "created": "..." } ] }
//! ```

mod photo;

pub use photo::{ImageCursor, Photo};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::ImageStrategy;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Manifest {
    #[serde(default)]
    photos: Vec<Photo>,
}

/// All gallery photos, in manifest order
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    photos: Vec<Photo>,
}

impl Gallery {
    /// Load the manifest at `path`; a missing file gives an empty gallery
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No photo manifest at {:?}", path);
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let gallery = Self::from_json(&content)
            .with_context(|| format!("Invalid photo manifest {:?}", path))?;

        tracing::debug!("Loaded {} photos from {:?}", gallery.len(), path);
        Ok(gallery)
    }

    /// Parse a manifest document
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        Ok(Self {
            photos: manifest.photos,
        })
    }

    /// Serialize back into manifest form
    pub fn to_json(&self) -> Result<String> {
        let manifest = Manifest {
            photos: self.photos.clone(),
        };
        Ok(serde_json::to_string_pretty(&manifest)?)
    }

    /// Copy of the gallery with every image URL rewritten by `strategy`
    pub fn with_rewritten_urls(&self, strategy: &ImageStrategy) -> Self {
        Self {
            photos: self
                .photos
                .iter()
                .map(|p| p.with_rewritten_urls(strategy))
                .collect(),
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Distinct categories, in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        self.photos
            .iter()
            .map(|p| p.category.as_str())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .collect()
    }

    /// Photos in `category`, or every photo when no category is given
    pub fn filter(&self, category: Option<&str>) -> Vec<&Photo> {
        self.photos
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }

    /// Look up a photo by id
    pub fn find(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }
}
