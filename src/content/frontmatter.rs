//! Front-matter parsing
//!
//! Posts carry a small header between two `---` marker lines. The header is
//! not full YAML: every line is either `key: value`, a `- value` item that
//! extends the `tags` list, a `#` comment, or blank.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ContentError;

lazy_static! {
    /// Opening marker at the very start, closing marker at the next `---`
    /// that follows a line break.
    static ref BLOCK: Regex = Regex::new(r"^---[\r\n]+([\s\S]*?)[\r\n]+---").expect("valid block pattern");
    static ref LINE_BREAKS: Regex = Regex::new(r"[\r\n]+").expect("valid line pattern");
}

/// The only key whose value is a list of `- item` lines
const LIST_KEY: &str = "tags";

/// Which list, if any, a `- item` line currently extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Inactive,
    Tags,
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,

    /// Keys this parser has no field for, in declaration order
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let captures = BLOCK
            .captures(content)
            .ok_or(ContentError::MissingFrontMatter)?;

        let block_end = captures.get(0).map_or(0, |m| m.end());
        let header = captures.get(1).map_or("", |m| m.as_str());

        let body = content[block_end..].trim();
        Ok((Self::parse_header(header), body))
    }

    fn parse_header(header: &str) -> Self {
        let mut fm = FrontMatter::default();
        let mut state = ListState::Inactive;

        for line in LINE_BREAKS.split(header) {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                let value = value.trim();

                if key == LIST_KEY {
                    state = ListState::Tags;
                    fm.tags.clear();
                    if !value.is_empty() {
                        tracing::debug!("Ignoring inline value for `tags`: {}", value);
                    }
                    continue;
                }

                state = ListState::Inactive;
                if !value.is_empty() {
                    fm.set(key, value);
                }
            } else if let Some(item) = line.strip_prefix("- ") {
                match state {
                    ListState::Tags => fm.tags.push(item.trim().to_string()),
                    ListState::Inactive => {
                        tracing::debug!("Dropping list item outside of `tags`: {}", item);
                    }
                }
            }
        }

        fm
    }

    fn set(&mut self, key: &str, value: &str) {
        let value = value.to_string();
        match key {
            "title" => self.title = Some(value),
            "created" => self.created = Some(value),
            "updated" => self.updated = Some(value),
            "category" => self.category = Some(value),
            "summary" => self.summary = Some(value),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }
}
