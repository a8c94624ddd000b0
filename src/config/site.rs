//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_RECENT_LIMIT;
use crate::helpers::ImageStrategy;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub photos_file: String,
    pub public_dir: String,

    // Blog
    /// Route prefix of post detail pages
    pub blog_root: String,
    pub recent_limit: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Gallery
    #[serde(default)]
    pub image: ImageStrategy,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            author: "John Doe".to_string(),
            url: "http://example.com".to_string(),

            posts_dir: "posts".to_string(),
            photos_file: "photos.json".to_string(),
            public_dir: "public".to_string(),

            blog_root: "/blogs".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            highlight: HighlightConfig::default(),

            image: ImageStrategy::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.blog_root, "/blogs");
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.image, ImageStrategy::default());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
posts_dir: src/assets/posts
recent_limit: 3
highlight:
  line_number: true
image:
  strategy: resize
  service: https://img.test/
analytics: abc
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.posts_dir, "src/assets/posts");
        assert_eq!(config.recent_limit, 3);
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(
            config.image,
            ImageStrategy::Resize {
                service: "https://img.test/".to_string()
            }
        );
        assert!(config.extra.contains_key("analytics"));
    }
}
