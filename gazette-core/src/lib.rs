//! # gazette-core
//!
//! Content core for the gazette news site.
//!
//! This crate loads articles, authors and categories from frontmatter
//! documents into an immutable [`ContentStore`], and provides the read-only
//! queries page templates are built from (home feed, archive, article,
//! author, category and tag pages, related articles, sitemap, robots.txt).

pub mod config;
pub mod derive;
pub mod frontmatter;
pub mod loader;
pub mod models;
pub mod query;
pub mod schema;
pub mod sitemap;
pub mod slug;

pub use config::Config;
pub use gazette_types::{EntityKind, FieldType, Status};
pub use loader::{ContentLoader, LoadError, SourceFile};
pub use models::{
    Article, Author, Category, Collection, ContentStore, Diagnostic, DiagnosticSeverity,
    FeaturedImage, Keyed, Scoreline,
};
pub use sitemap::{build_sitemap, render_robots, SitemapEntry};
pub use slug::{slugify, tag_url};
