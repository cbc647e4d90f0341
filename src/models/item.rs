//! Catalog entry model and related types

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A describable work that can sit on the shelf or be held by a reader.
///
/// Identity is the `(title, author)` pair: two entries with the same title
/// and author are the same work for lending and removal, whatever their year
/// or genre. There is no surrogate key, so adding the same work twice yields
/// two shelved entries with one identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub title: String,
    pub author: String,
    #[serde(rename = "year")]
    pub publication_year: i32,
    pub genre: String,
}

impl CatalogEntry {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            genre: genre.into(),
        }
    }

    /// True when both entries describe the same work
    pub fn same_work(&self, other: &CatalogEntry) -> bool {
        self.title == other.title && self.author == other.author
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.title == title
    }

    /// Title match, narrowed by author when one is given
    pub fn matches(&self, title: &str, author: Option<&str>) -> bool {
        self.title == title && author.map_or(true, |a| self.author == a)
    }
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.same_work(other)
    }
}

impl Eq for CatalogEntry {}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {}",
            self.title, self.author, self.publication_year, self.genre
        )
    }
}

/// Add-to-shelf request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewEntry {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub genre: String,
}

impl From<NewEntry> for CatalogEntry {
    fn from(entry: NewEntry) -> Self {
        CatalogEntry::new(entry.title, entry.author, entry.year, entry.genre)
    }
}

/// Identity of a work, used to remove it from the shelf
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EntryIdentity {
    pub title: String,
    pub author: String,
}

/// Shelf lookup query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EntryQuery {
    /// Exact title
    pub title: String,
    /// Exact author, optional
    pub author: Option<String>,
}
