//! Show a single post or photo

use anyhow::{Context, Result};

use crate::content::PostDetail;
use crate::helpers::display_date;
use crate::Folio;

/// Print a post's metadata followed by its markdown, or rendered HTML
pub fn post(folio: &Folio, slug: &str, html: bool) -> Result<()> {
    let post = folio.load_post(slug)?;

    // Neighbours come from the catalog, which drops invalid posts
    let catalog = folio.load_catalog()?;
    let detail = PostDetail::new(&post, catalog.posts(), &folio.renderer());

    println!("{}", post.title);
    println!("  Date:     {}", detail.date);
    if post.updated != post.created {
        println!("  Updated:  {}", display_date(&post.updated));
    }
    println!("  Category: {}", post.category);
    if !post.tags.is_empty() {
        println!("  Tags:     {}", post.tags.join(", "));
    }
    if !post.summary.is_empty() {
        println!("  Summary:  {}", post.summary);
    }
    for (key, value) in &post.extra {
        println!("  {}: {}", key, value);
    }
    println!();

    if html {
        println!("{}", detail.html);
    } else {
        println!("{}", post.content);
    }

    if let Some(prev) = &detail.prev {
        println!("\n← {} ({})", prev.title, prev.path);
    }
    if let Some(next) = &detail.next {
        println!("→ {} ({})", next.title, next.path);
    }

    Ok(())
}

/// Print a gallery photo with its (rewritten) image URLs
pub fn photo(folio: &Folio, id: &str) -> Result<()> {
    let gallery = folio.load_gallery()?;
    let photo = gallery
        .find(id)
        .with_context(|| format!("Photo not found: {}", id))?
        .with_rewritten_urls(&folio.config.image);

    println!("{}", photo.title);
    if !photo.description.is_empty() {
        println!("  {}", photo.description);
    }
    println!("  Date:     {}", photo.created);
    println!("  Category: {}", photo.category);
    for (i, url) in photo.urls.iter().enumerate() {
        println!("  [{}] {}", i + 1, url);
    }

    Ok(())
}
