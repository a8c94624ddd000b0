//! Post catalog: the sorted, filterable set of valid posts

use indexmap::IndexSet;
use serde::Deserialize;

use super::Post;

/// Number of posts shown in the "recent" list by default
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Sorted collection of valid posts
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    /// Build a catalog from `(identifier, raw text)` pairs
    ///
    /// Documents without front-matter or without a title, created date or
    /// category are logged and left out, as are repeats of an identifier
    /// already seen (the first one wins). The rest are ordered newest first;
    /// posts with equal (or unreadable) dates keep their input order, and
    /// unreadable dates go last.
    pub fn build<I, K, V>(documents: I, blog_root: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut posts = Vec::new();
        let mut seen: IndexSet<String> = IndexSet::new();

        for (id, text) in documents {
            let id = id.as_ref();
            if seen.contains(id) {
                tracing::warn!("Skipping duplicate post {}", id);
                continue;
            }
            match Post::parse(id, text.as_ref(), blog_root) {
                Ok(post) => {
                    tracing::debug!("Parsed post {} ({} tags)", id, post.tags.len());
                    seen.insert(id.to_string());
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Skipping post {}: {}", id, e);
                }
            }
        }

        Self::from_posts(posts)
    }

    /// Wrap already-parsed posts, sorting them newest first
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        // Stable; `None` orders below any date so it ends up last.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { posts }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts matching every set criterion of `filter`
    pub fn filter(&self, filter: &PostFilter) -> Vec<&Post> {
        self.posts.iter().filter(|p| filter.matches(p)).collect()
    }

    /// The newest `limit` posts
    pub fn recent(&self, limit: usize) -> &[Post] {
        &self.posts[..limit.min(self.posts.len())]
    }

    /// Look up a post by its file identifier
    pub fn find(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Distinct tags, in order of first appearance
    pub fn tags(&self) -> Vec<&str> {
        self.tag_counts().into_iter().map(|(tag, _)| tag).collect()
    }

    /// Distinct categories, in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        self.category_counts()
            .into_iter()
            .map(|(cat, _)| cat)
            .collect()
    }

    /// Post count per tag, in order of first appearance
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        count_distinct(
            self.posts
                .iter()
                .flat_map(|p| p.tags.iter().map(String::as_str)),
        )
    }

    /// Post count per category, in order of first appearance
    pub fn category_counts(&self) -> Vec<(&str, usize)> {
        count_distinct(self.posts.iter().map(|p| p.category.as_str()))
    }
}

fn count_distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: indexmap::IndexMap<&str, usize> = indexmap::IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Criteria for narrowing the catalog
///
/// Every criterion that is set must match; unset (or empty) criteria match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostFilter {
    /// Exact, case-sensitive tag membership
    pub tag: Option<String>,

    /// Exact, case-sensitive category equality
    pub category: Option<String>,

    /// Case-insensitive substring of title, summary, body or a tag
    #[serde(alias = "q")]
    pub search: Option<String>,
}

impl PostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        set(&self.tag).is_some() || set(&self.category).is_some() || set(&self.search).is_some()
    }

    /// Check a post against every set criterion
    pub fn matches(&self, post: &Post) -> bool {
        let matches_tag = set(&self.tag).map_or(true, |tag| post.tags.iter().any(|t| t == tag));

        let matches_category = set(&self.category).map_or(true, |cat| post.category == cat);

        let matches_search = set(&self.search).map_or(true, |query| {
            let query = query.to_lowercase();
            let hit = |field: &str| field.to_lowercase().contains(&query);
            hit(post.title.as_str())
                || hit(post.summary.as_str())
                || hit(post.content.as_str())
                || post.tags.iter().any(|t| hit(t.as_str()))
        });

        matches_tag && matches_category && matches_search
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Selection state of one list view
///
/// Each view owns its own instance; picking the tag or category that is
/// already selected clears it again.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    filter: PostFilter,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tag(&self) -> Option<&str> {
        set(&self.filter.tag)
    }

    pub fn selected_category(&self) -> Option<&str> {
        set(&self.filter.category)
    }

    pub fn search_text(&self) -> &str {
        self.filter.search.as_deref().unwrap_or_default()
    }

    /// Select `tag`, or clear the selection if it is already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        self.filter.tag = toggle(self.filter.tag.take(), tag);
    }

    /// Select `category`, or clear the selection if it is already selected
    pub fn toggle_category(&mut self, category: &str) {
        self.filter.category = toggle(self.filter.category.take(), category);
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = Some(text.into());
    }

    pub fn clear(&mut self) {
        self.filter = PostFilter::default();
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Posts this view currently shows
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Post> {
        catalog.filter(&self.filter)
    }
}

fn toggle(current: Option<String>, item: &str) -> Option<String> {
    match current {
        Some(selected) if selected == item => None,
        _ => Some(item.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, created: &str, category: &str, tags: &[&str], body: &str) -> String {
        let mut text = format!(
            "---\ntitle: {}\ncreated: {}\ncategory: {}\nsummary: Summary of {}\ntags:\n",
            title, created, category, title
        );
        for tag in tags {
            text.push_str(&format!("- {}\n", tag));
        }
        text.push_str("---\n");
        text.push_str(body);
        text
    }

    fn sample() -> Catalog {
        Catalog::build(
            vec![
                ("old", doc("Old Post", "2023-05-01", "Life", &["travel"], "Trip notes")),
                ("new", doc("Hello World", "2024-06-01", "Tech", &["rust", "web"], "First")),
                ("mid", doc("Middle", "2024-01-10 09:00:00", "Tech", &["rust"], "Borrowck")),
                ("broken", "no header at all".to_string()),
                ("untitled", "---\ncreated: 2024-01-01\ncategory: Tech\n---\n".to_string()),
            ],
            "/blogs",
        )
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_duplicate_identifiers_dropped() {
        let catalog = Catalog::build(
            vec![
                ("a", doc("First", "2024-01-01", "Tech", &[], "one")),
                ("a", doc("Second", "2024-02-01", "Tech", &[], "two")),
                ("b", doc("Other", "2023-01-01", "Life", &[], "three")),
            ],
            "/blogs",
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("a").unwrap().title, "First");
        let paths: Vec<&str> = catalog.posts().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/blogs/a", "/blogs/b"]);
    }

    #[test]
    fn test_invalid_identifier_does_not_shadow_valid_one() {
        let catalog = Catalog::build(
            vec![
                ("a", "no header".to_string()),
                ("a", doc("Valid", "2024-01-01", "Tech", &[], "")),
            ],
            "/blogs",
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("a").unwrap().title, "Valid");
    }

    #[test]
    fn test_invalid_documents_dropped() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.find("broken").is_none());
        assert!(catalog.find("untitled").is_none());
    }

    #[test]
    fn test_sorted_newest_first() {
        let catalog = sample();
        let order: Vec<_> = catalog.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);

        for pair in catalog.posts().windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn test_ties_keep_input_order_and_bad_dates_last() {
        let catalog = Catalog::build(
            vec![
                ("undated", doc("U", "someday", "X", &[], "")),
                ("first", doc("A", "2024-01-01", "X", &[], "")),
                ("second", doc("B", "2024-01-01", "X", &[], "")),
            ],
            "/blogs",
        );
        let order: Vec<_> = catalog.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "undated"]);
    }

    #[test]
    fn test_filter_by_tag_is_exact() {
        let catalog = sample();
        let hits = catalog.filter(&PostFilter::new().tag("rust"));
        assert_eq!(slugs(&hits), vec!["new", "mid"]);

        assert!(catalog.filter(&PostFilter::new().tag("Rust")).is_empty());
        assert!(catalog.filter(&PostFilter::new().tag("rus")).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = sample();
        let hits = catalog.filter(&PostFilter::new().category("Life"));
        assert_eq!(slugs(&hits), vec!["old"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = sample();
        let hits = catalog.filter(&PostFilter::new().search("hello"));
        assert_eq!(slugs(&hits), vec!["new"]);

        // body
        let hits = catalog.filter(&PostFilter::new().search("BORROWCK"));
        assert_eq!(slugs(&hits), vec!["mid"]);

        // summary
        let hits = catalog.filter(&PostFilter::new().search("summary of old"));
        assert_eq!(slugs(&hits), vec!["old"]);

        // tag
        let hits = catalog.filter(&PostFilter::new().search("TRAV"));
        assert_eq!(slugs(&hits), vec!["old"]);
    }

    #[test]
    fn test_filters_compose() {
        let catalog = sample();
        let filter = PostFilter::new().tag("rust").category("Tech").search("first");
        assert_eq!(slugs(&catalog.filter(&filter)), vec!["new"]);

        let filter = PostFilter::new().tag("rust").category("Life");
        assert!(catalog.filter(&filter).is_empty());
    }

    #[test]
    fn test_unset_filter_matches_everything() {
        let catalog = sample();
        assert_eq!(catalog.filter(&PostFilter::new()).len(), 3);

        let blank = PostFilter::new().tag("").category("").search("");
        assert!(!blank.is_active());
        assert_eq!(catalog.filter(&blank).len(), 3);
    }

    #[test]
    fn test_distinct_tags_and_categories() {
        let catalog = sample();
        assert_eq!(catalog.tags(), vec!["rust", "web", "travel"]);
        assert_eq!(catalog.categories(), vec!["Tech", "Life"]);
        assert_eq!(catalog.tag_counts()[0], ("rust", 2));
        assert_eq!(catalog.category_counts(), vec![("Tech", 2), ("Life", 1)]);
    }

    #[test]
    fn test_recent() {
        let catalog = sample();
        let recent: Vec<_> = catalog.recent(2).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(recent, vec!["new", "mid"]);
        assert_eq!(catalog.recent(DEFAULT_RECENT_LIMIT).len(), 3);
        assert!(Catalog::default().recent(5).is_empty());
    }

    #[test]
    fn test_view_toggles_selection() {
        let catalog = sample();
        let mut view = CatalogView::new();
        assert_eq!(view.visible(&catalog).len(), 3);

        view.toggle_tag("rust");
        assert_eq!(view.selected_tag(), Some("rust"));
        assert_eq!(view.visible(&catalog).len(), 2);

        view.toggle_category("Tech");
        view.set_search("hello");
        assert_eq!(slugs(&view.visible(&catalog)), vec!["new"]);

        view.toggle_tag("rust");
        assert_eq!(view.selected_tag(), None);

        view.toggle_category("Life");
        assert_eq!(view.selected_category(), Some("Life"));
        assert!(view.visible(&catalog).is_empty());

        view.clear();
        assert_eq!(view.search_text(), "");
        assert_eq!(view.visible(&catalog).len(), 3);
    }

    #[test]
    fn test_views_are_independent() {
        let catalog = sample();
        let mut list = CatalogView::new();
        let home = CatalogView::new();

        list.toggle_category("Life");
        assert_eq!(list.visible(&catalog).len(), 1);
        assert_eq!(home.visible(&catalog).len(), 3);
    }
}
