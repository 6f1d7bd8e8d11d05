//! Shared types for gazette
//!
//! This crate provides the vocabulary shared by the content core and the
//! CLI: the kinds of documents a site is made of, the publication status of
//! an article, and the field types a document schema can declare.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Article,
    Author,
    Category,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Article, EntityKind::Author, EntityKind::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Article => "article",
            EntityKind::Author => "author",
            EntityKind::Category => "category",
        }
    }

    /// Directory (relative to the content root) holding documents of this kind
    pub fn directory(&self) -> &'static str {
        match self {
            EntityKind::Article => "articles",
            EntityKind::Author => "authors",
            EntityKind::Category => "categories",
        }
    }

    /// Whether documents may live in nested subdirectories
    pub fn recursive(&self) -> bool {
        matches!(self, EntityKind::Article)
    }

    /// Canonical URL path for a record of this kind
    pub fn url_for(&self, slug: &str) -> String {
        format!("/{}/{}", self.directory(), slug)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication status of an article
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Draft,
    Published,
}

impl Status {
    /// Parse a status value; only the exact lowercase spellings are accepted
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Status::Draft),
            "published" => Some(Status::Published),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Published => "published",
        }
    }
}

/// Type of a single frontmatter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Date,
    Number,
    Boolean,
    StringList,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Date => "date",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::StringList => "list of strings",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
