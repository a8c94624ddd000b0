//! Errors raised while turning a markdown document into a post

use thiserror::Error;

/// Why a document was left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("no front-matter block found")]
    MissingFrontMatter,

    #[error("missing required front-matter field: {0}")]
    MissingField(&'static str),
}
