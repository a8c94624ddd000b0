//! Content loader - reads post documents from the posts directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Catalog, Post};
use crate::Folio;

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Read every `*.md` directly inside the posts directory
    ///
    /// Returns `(file stem, raw text)` pairs in file-name order. Files that
    /// cannot be read are logged and skipped.
    pub fn load_documents(&self) -> Result<Vec<(String, String)>> {
        let posts_dir = &self.folio.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping post with non UTF-8 name: {:?}", path);
                continue;
            };

            match fs::read_to_string(path) {
                Ok(text) => documents.push((stem.to_string(), text)),
                Err(e) => tracing::warn!("Failed to read post {:?}: {}", path, e),
            }
        }

        Ok(documents)
    }

    /// Load and sort all valid posts
    pub fn load_catalog(&self) -> Result<Catalog> {
        let documents = self.load_documents()?;
        let total = documents.len();
        let catalog = Catalog::build(documents, &self.folio.config.blog_root);

        tracing::info!(
            "Loaded {} posts ({} skipped)",
            catalog.len(),
            total - catalog.len()
        );
        Ok(catalog)
    }

    /// Load a single post by its file identifier
    ///
    /// Unlike [`load_catalog`](Self::load_catalog), problems with the
    /// document are reported to the caller.
    pub fn load_post(&self, slug: &str) -> Result<Post> {
        let path = self.folio.posts_dir.join(format!("{}.md", slug));
        if !path.is_file() {
            anyhow::bail!("Post not found: {}", slug);
        }

        let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        let post = Post::parse(slug, &text, &self.folio.config.blog_root)
            .with_context(|| format!("Invalid post {}", slug))?;

        Ok(post)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
