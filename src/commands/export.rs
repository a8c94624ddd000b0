//! Export the catalog and gallery as static JSON
//!
//! Layout under the public directory:
//!
//! - `data/posts.json`: post list with tag and category indexes
//! - `data/posts/<slug>.json`: one rendered post each
//! - `data/photos.json`: gallery manifest with rewritten image URLs

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{Catalog, Post, PostDetail};
use crate::Folio;

/// Post list document
#[derive(Debug, Serialize)]
pub struct PostIndex<'a> {
    pub posts: Vec<&'a Post>,
    pub tags: Vec<&'a str>,
    pub categories: Vec<&'a str>,
}

impl<'a> PostIndex<'a> {
    pub fn new(catalog: &'a Catalog, posts: Vec<&'a Post>) -> Self {
        Self {
            posts,
            tags: catalog.tags(),
            categories: catalog.categories(),
        }
    }
}

/// Directory the exported JSON lives in
pub fn data_dir(folio: &Folio) -> PathBuf {
    folio.public_dir.join("data")
}

/// Write all JSON documents
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let catalog = folio.load_catalog()?;
    let gallery = folio.load_gallery()?;
    let renderer = folio.renderer();

    // Stale detail files must not outlive their posts
    super::clean::run(folio)?;

    let data_dir = data_dir(folio);
    fs::create_dir_all(data_dir.join("posts"))?;

    let index = PostIndex::new(&catalog, catalog.posts().iter().collect());
    write_json(&data_dir.join("posts.json"), &index)?;

    for post in catalog.posts() {
        let detail = PostDetail::new(post, catalog.posts(), &renderer);
        write_json(
            &data_dir.join("posts").join(format!("{}.json", post.slug)),
            &detail,
        )?;
    }

    let photos = gallery.with_rewritten_urls(&folio.config.image).to_json()?;
    fs::write(data_dir.join("photos.json"), photos)?;

    tracing::info!(
        "Exported {} posts and {} photos in {:.2}s",
        catalog.len(),
        gallery.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.posts_dir).unwrap();
        fs::write(
            folio.posts_dir.join("a.md"),
            "---\ntitle: A\ncreated: 2024-01-01\ncategory: Tech\ntags:\n- rust\n---\n*hi*",
        )
        .unwrap();
        fs::write(folio.posts_dir.join("bad.md"), "nothing").unwrap();
        fs::write(
            &folio.photos_path,
            r#"{"photos":[{"id":"1","urls":["http://x.test/1.jpg"],"title":"T","category":"C","created":"2024"}]}"#,
        )
        .unwrap();

        run(&folio).unwrap();

        let data = data_dir(&folio);
        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(data.join("posts.json")).unwrap()).unwrap();
        assert_eq!(index["posts"].as_array().unwrap().len(), 1);
        assert_eq!(index["tags"][0], "rust");
        assert_eq!(index["categories"][0], "Tech");

        let detail: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(data.join("posts/a.json")).unwrap())
                .unwrap();
        assert_eq!(detail["title"], "A");
        assert_eq!(detail["date"], "2024年01月01日");
        assert!(detail["html"].as_str().unwrap().contains("<em>hi</em>"));
        assert!(!data.join("posts/bad.json").exists());

        let photos = fs::read_to_string(data.join("photos.json")).unwrap();
        assert!(photos.contains("/api/proxy-image?url=http%3A%2F%2Fx.test%2F1.jpg"));
    }

    #[test]
    fn test_reexport_drops_removed_posts() {
        let dir = tempfile::TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.posts_dir).unwrap();
        let post = "---\ntitle: T\ncreated: 2024-01-01\ncategory: Tech\n---\nbody";
        fs::write(folio.posts_dir.join("kept.md"), post).unwrap();
        fs::write(folio.posts_dir.join("gone.md"), post).unwrap();

        run(&folio).unwrap();
        let data = data_dir(&folio);
        assert!(data.join("posts/gone.json").exists());

        fs::remove_file(folio.posts_dir.join("gone.md")).unwrap();
        run(&folio).unwrap();

        assert!(!data.join("posts/gone.json").exists());
        assert!(data.join("posts/kept.json").exists());
        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(data.join("posts.json")).unwrap()).unwrap();
        assert_eq!(index["posts"].as_array().unwrap().len(), 1);
    }
}
