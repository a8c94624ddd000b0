//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create a new post file and return its path
///
/// The file name is `slug` if given, otherwise the slugified title.
pub fn create_post(
    folio: &Folio,
    title: &str,
    category: &str,
    tags: &[String],
    slug: Option<&str>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut content = format!(
        "---\ntitle: {}\ncreated: {}\nupdated: {}\ncategory: {}\nsummary:\ntags:\n",
        title, now, now, category
    );
    for tag in tags {
        content.push_str(&format!("- {}\n", tag));
    }
    content.push_str("---\n\n");

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
