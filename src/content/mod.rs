//! Content module - handles posts, front-matter and markdown rendering

mod catalog;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use catalog::{Catalog, CatalogView, PostFilter, DEFAULT_RECENT_LIMIT};
pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostDetail, PostLink};
