//! folio: content engine for a personal blog and photo portfolio
//!
//! Posts are markdown files with a small front-matter header; they are
//! parsed into a sorted, filterable catalog on every load. Photos come from
//! a JSON manifest. The catalog and gallery can be listed from the CLI,
//! exported as JSON, or served read-only over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod gallery;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main application: a site directory and its configuration
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the post markdown files
    pub posts_dir: std::path::PathBuf,
    /// Photo manifest
    pub photos_path: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let photos_path = base_dir.join(&config.photos_file);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            photos_path,
            public_dir,
        })
    }

    /// Parse every post into a fresh catalog
    pub fn load_catalog(&self) -> Result<content::Catalog> {
        content::loader::ContentLoader::new(self).load_catalog()
    }

    /// Load a single post by its file identifier
    pub fn load_post(&self, slug: &str) -> Result<content::Post> {
        content::loader::ContentLoader::new(self).load_post(slug)
    }

    /// Load the photo manifest
    pub fn load_gallery(&self) -> Result<gallery::Gallery> {
        gallery::Gallery::load(&self.photos_path)
    }

    /// Markdown renderer configured from the site settings
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }

    /// Export the catalog and gallery as JSON
    pub fn export(&self) -> Result<()> {
        commands::export::run(self)
    }

    /// Clean the exported data
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
