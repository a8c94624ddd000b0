//! Post model

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ContentError, FrontMatter, MarkdownRenderer};
use crate::helpers::parse_date_string;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Creation timestamp, as written in the front-matter
    pub created: String,

    /// Last updated timestamp (falls back to `created`)
    pub updated: String,

    /// Post category
    pub category: String,

    /// Short summary shown in lists
    pub summary: String,

    /// Post tags, in declaration order
    pub tags: Vec<String>,

    /// URL path of the detail view
    pub path: String,

    /// File identifier the post was loaded from
    pub slug: String,

    /// Raw markdown body
    pub content: String,

    /// Parsed `created`, used for ordering
    #[serde(skip)]
    pub created_at: Option<NaiveDateTime>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl Post {
    /// Build a post from a raw markdown document
    ///
    /// `slug` is the document's file identifier; `blog_root` is the route
    /// prefix of the detail view.
    pub fn parse(slug: &str, text: &str, blog_root: &str) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(text)?;
        Self::from_front_matter(slug, fm, body, blog_root)
    }

    /// Validate parsed front-matter and assemble the post
    pub fn from_front_matter(
        slug: &str,
        fm: FrontMatter,
        body: &str,
        blog_root: &str,
    ) -> Result<Self, ContentError> {
        let title = fm.title.ok_or(ContentError::MissingField("title"))?;
        let created = fm.created.ok_or(ContentError::MissingField("created"))?;
        let category = fm.category.ok_or(ContentError::MissingField("category"))?;

        let created_at = parse_date_string(&created);
        if created_at.is_none() {
            tracing::warn!("Unrecognized created date {:?} in {}", created, slug);
        }

        Ok(Self {
            title,
            updated: fm.updated.unwrap_or_else(|| created.clone()),
            created,
            category,
            summary: fm.summary.unwrap_or_default(),
            tags: fm.tags,
            path: format!("{}/{}", blog_root.trim_end_matches('/'), slug),
            slug: slug.to_string(),
            content: body.to_string(),
            created_at,
            extra: fm.extra,
        })
    }

    /// Get the previous (newer) post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

/// Title and path of a neighbouring post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostLink {
    pub title: String,
    pub path: String,
}

impl From<&Post> for PostLink {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            path: post.path.clone(),
        }
    }
}

/// A post prepared for the detail view
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,

    /// Display form of `created`
    pub date: String,

    /// Rendered HTML body
    pub html: String,

    pub prev: Option<PostLink>,
    pub next: Option<PostLink>,
}

impl PostDetail {
    /// Render a post and resolve its neighbours within `posts`
    pub fn new(post: &Post, posts: &[Post], renderer: &MarkdownRenderer) -> Self {
        Self {
            date: crate::helpers::display_date(&post.created),
            html: renderer.render(&post.content),
            prev: post.prev(posts).map(PostLink::from),
            next: post.next(posts).map(PostLink::from),
            post: post.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ntitle: Test\ncreated: 2024-01-01\ncategory: Tech\nsummary: About tests\ntags:\n- a\n- b\n---\nBody text";

    #[test]
    fn test_parse_post() {
        let post = Post::parse("test-post", DOC, "/blogs").unwrap();
        assert_eq!(post.title, "Test");
        assert_eq!(post.created, "2024-01-01");
        assert_eq!(post.updated, "2024-01-01");
        assert_eq!(post.category, "Tech");
        assert_eq!(post.summary, "About tests");
        assert_eq!(post.tags, vec!["a", "b"]);
        assert_eq!(post.path, "/blogs/test-post");
        assert_eq!(post.content, "Body text");
        assert!(post.created_at.is_some());
    }

    #[test]
    fn test_defaults() {
        let doc = "---\ntitle: Bare\ncreated: 2024-03-01 08:00\ncategory: Notes\n---\n";
        let post = Post::parse("bare", doc, "/blogs/").unwrap();
        assert_eq!(post.updated, "2024-03-01 08:00");
        assert_eq!(post.summary, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.path, "/blogs/bare");
    }

    #[test]
    fn test_missing_required_fields() {
        let no_title = "---\ncreated: 2024-01-01\ncategory: Tech\n---\n";
        assert_eq!(
            Post::parse("x", no_title, "/blogs"),
            Err(ContentError::MissingField("title"))
        );

        let no_created = "---\ntitle: T\ncategory: Tech\n---\n";
        assert_eq!(
            Post::parse("x", no_created, "/blogs"),
            Err(ContentError::MissingField("created"))
        );

        let empty_category = "---\ntitle: T\ncreated: 2024-01-01\ncategory:\n---\n";
        assert_eq!(
            Post::parse("x", empty_category, "/blogs"),
            Err(ContentError::MissingField("category"))
        );
    }

    #[test]
    fn test_no_frontmatter() {
        assert_eq!(
            Post::parse("x", "# Just markdown", "/blogs"),
            Err(ContentError::MissingFrontMatter)
        );
    }

    #[test]
    fn test_serialize_flattens_extra() {
        let doc = "---\ntitle: T\ncreated: 2024-01-01\ncategory: C\ncover: a.png\n---\n";
        let post = Post::parse("t", doc, "/blogs").unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["cover"], "a.png");
        assert_eq!(json["path"], "/blogs/t");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_prev_next() {
        let posts: Vec<Post> = ["a", "b", "c"]
            .iter()
            .map(|slug| Post::parse(slug, DOC, "/blogs").unwrap())
            .collect();

        assert_eq!(posts[1].prev(&posts).map(|p| p.slug.as_str()), Some("a"));
        assert_eq!(posts[1].next(&posts).map(|p| p.slug.as_str()), Some("c"));
        assert!(posts[0].prev(&posts).is_none());
        assert!(posts[2].next(&posts).is_none());
    }

    #[test]
    fn test_post_detail() {
        let posts = vec![
            Post::parse("newer", DOC, "/blogs").unwrap(),
            Post::parse("older", DOC, "/blogs").unwrap(),
        ];
        let detail = PostDetail::new(&posts[1], &posts, &MarkdownRenderer::new());
        assert_eq!(detail.date, "2024年01月01日");
        assert!(detail.html.contains("<p>Body text</p>"));
        assert_eq!(detail.prev.map(|p| p.path), Some("/blogs/newer".to_string()));
        assert!(detail.next.is_none());
    }
}
