//! Content model structs for articles, authors, categories and the loaded store.

use chrono::NaiveDate;
use gazette_types::{EntityKind, Status};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A record that is identified by its slug
pub trait Keyed {
    fn slug(&self) -> &str;
}

/// Featured image shown above an article
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImage {
    pub src: String,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

/// Match details for sports coverage
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreline {
    pub sport: Option<String>,
    pub opponent: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_score: Option<f64>,
    pub away_score: Option<f64>,
}

impl Scoreline {
    pub fn is_empty(&self) -> bool {
        *self == Scoreline::default()
    }
}

/// A single article
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// URL slug (e.g., "council-passes-budget")
    pub slug: String,

    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Last updated date
    pub updated_at: Option<NaiveDate>,

    /// Category slug
    pub category: String,

    pub subcategory: Option<String>,

    /// Short summary shown with previews
    pub dek: Option<String>,

    /// Author slugs, in byline order
    pub authors: Vec<String>,

    pub tags: Vec<String>,

    pub featured_image: Option<FeaturedImage>,

    #[serde(skip_serializing_if = "Scoreline::is_empty")]
    pub scoreline: Scoreline,

    pub is_opinion: bool,

    pub featured: bool,

    pub status: Status,

    /// Canonical URL path
    pub url: String,

    pub word_count: usize,

    /// Reading time in minutes
    pub estimated_read_time: usize,

    /// Raw body (without frontmatter)
    #[serde(skip)]
    pub body: String,

    /// Source path relative to the content directory
    pub source_path: Option<String>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == Status::Published
    }

    /// Date used for "last modified" purposes
    pub fn last_modified(&self) -> NaiveDate {
        self.updated_at.unwrap_or(self.date)
    }

    pub fn has_author(&self, author_slug: &str) -> bool {
        self.authors.iter().any(|a| a == author_slug)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Keyed for Article {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A staff writer or contributor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub slug: String,
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub twitter: Option<String>,
    pub url: String,
    #[serde(skip)]
    pub body: String,
    pub source_path: Option<String>,
}

impl Keyed for Author {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// A section of the site
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub name: String,
    /// Parent category slug
    pub parent: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub source_path: Option<String>,
}

impl Keyed for Category {
    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Order-preserving collection with O(1) lookup by slug
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> Collection<T> {
    /// Build a collection, rejecting the first repeated slug
    pub fn from_vec(items: Vec<T>) -> Result<Self, String> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.slug().to_string(), pos).is_some() {
                return Err(item.slug().to_string());
            }
        }
        Ok(Self { items, index })
    }

    pub fn get(&self, slug: &str) -> Option<&T> {
        self.index.get(slug).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

/// Severity of a load diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Info,
    Warning,
}

/// A non-fatal problem found while loading content
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub kind: EntityKind,
    pub slug: Option<String>,
    pub source_path: Option<String>,
}

/// All content loaded for one build
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentStore {
    pub articles: Collection<Article>,
    pub authors: Collection<Author>,
    pub categories: Collection<Category>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ContentStore {
    pub fn article(&self, slug: &str) -> Option<&Article> {
        self.articles.get(slug)
    }

    pub fn author(&self, slug: &str) -> Option<&Author> {
        self.authors.get(slug)
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.get(slug)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
    }
}
