//! List site content

use anyhow::Result;

use crate::content::PostFilter;
use crate::helpers::display_date;
use crate::Folio;

/// List site content by type
///
/// `filter` narrows posts; its `category` also narrows photos.
pub fn run(folio: &Folio, content_type: &str, filter: &PostFilter) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let catalog = folio.load_catalog()?;
            let posts = catalog.filter(filter);
            println!("Posts ({}):", posts.len());
            if posts.is_empty() {
                if filter.is_active() {
                    println!("  No posts match these filters.");
                } else {
                    println!("  No posts yet.");
                }
            }
            for post in posts {
                println!(
                    "  {} - {} [{}] {}",
                    display_date(&post.created),
                    post.title,
                    post.category,
                    post.path
                );
            }
        }
        "recent" => {
            let catalog = folio.load_catalog()?;
            let recent = catalog.recent(folio.config.recent_limit);
            println!("Recent posts ({}):", recent.len());
            for post in recent {
                println!("  {} - {}", display_date(&post.created), post.title);
            }
        }
        "tag" | "tags" => {
            let catalog = folio.load_catalog()?;
            let tags = catalog.tag_counts();
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let catalog = folio.load_catalog()?;
            let categories = catalog.category_counts();
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        "photo" | "photos" => {
            let gallery = folio.load_gallery()?;
            let category = filter.category.as_deref().filter(|c| !c.is_empty());
            let photos = gallery.filter(category);
            println!("Photos ({}):", photos.len());
            for photo in photos {
                println!(
                    "  {} - {} [{}] {} image(s)",
                    photo.id,
                    photo.title,
                    photo.category,
                    photo.urls.len()
                );
            }
            println!("Categories: {}", gallery.categories().join(", "));
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, recent, tag, category, photo",
                content_type
            );
        }
    }

    Ok(())
}
