//! Photo model and image cursor

use serde::{Deserialize, Serialize};

use crate::helpers::ImageStrategy;

/// A gallery entry: one or more images sharing a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub urls: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub created: String,
}

impl Photo {
    /// URL of the cover image
    pub fn cover(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    /// Copy of this photo with every image URL rewritten by `strategy`
    pub fn with_rewritten_urls(&self, strategy: &ImageStrategy) -> Self {
        Self {
            urls: self.urls.iter().map(|url| strategy.rewrite(url)).collect(),
            ..self.clone()
        }
    }

    /// Start browsing this photo's images at `index`
    pub fn cursor(&self, index: usize) -> ImageCursor<'_> {
        ImageCursor::new(self, index)
    }
}

/// Position within a photo's images; stepping past either end wraps around
#[derive(Debug, Clone, Copy)]
pub struct ImageCursor<'a> {
    photo: &'a Photo,
    index: usize,
}

impl<'a> ImageCursor<'a> {
    pub fn new(photo: &'a Photo, index: usize) -> Self {
        let index = if photo.urls.is_empty() {
            0
        } else {
            index.min(photo.urls.len() - 1)
        };
        Self { photo, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&'a str> {
        self.photo.urls.get(self.index).map(String::as_str)
    }

    pub fn next(&mut self) -> Option<&'a str> {
        let len = self.photo.urls.len();
        if len > 0 {
            self.index = if self.index + 1 >= len { 0 } else { self.index + 1 };
        }
        self.current()
    }

    pub fn prev(&mut self) -> Option<&'a str> {
        let len = self.photo.urls.len();
        if len > 0 {
            self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(urls: &[&str]) -> Photo {
        Photo {
            id: "p1".to_string(),
            urls: urls.iter().map(|u| u.to_string()).collect(),
            title: "Harbour".to_string(),
            description: String::new(),
            category: "Travel".to_string(),
            created: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let p = photo(&["a", "b", "c"]);
        let mut cursor = p.cursor(0);
        assert_eq!(cursor.prev(), Some("c"));
        assert_eq!(cursor.next(), Some("a"));
        assert_eq!(cursor.next(), Some("b"));
        assert_eq!(cursor.next(), Some("c"));
        assert_eq!(cursor.next(), Some("a"));
    }

    #[test]
    fn test_cursor_clamps_start_and_handles_empty() {
        let p = photo(&["a", "b"]);
        assert_eq!(p.cursor(9).current(), Some("b"));

        let empty = photo(&[]);
        let mut cursor = empty.cursor(3);
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_rewritten_urls() {
        let p = photo(&["http://cdn.test/a.jpg", "https://cdn.test/b.jpg"]);
        let rewritten = p.with_rewritten_urls(&ImageStrategy::default());
        assert_eq!(
            rewritten.urls,
            vec![
                "/api/proxy-image?url=http%3A%2F%2Fcdn.test%2Fa.jpg",
                "https://cdn.test/b.jpg"
            ]
        );
        assert_eq!(rewritten.title, p.title);
        assert_eq!(p.cover(), Some("http://cdn.test/a.jpg"));
    }
}
