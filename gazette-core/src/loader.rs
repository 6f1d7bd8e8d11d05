//! Content loading - discovers, parses, validates and cross-checks documents.

use crate::{
    config::Config,
    derive::{estimated_read_time, word_count},
    frontmatter::{parse_frontmatter, FrontmatterError},
    models::*,
    schema::{DocumentSchema, Fields, SchemaError},
    slug::is_canonical_slug,
};
use gazette_types::{EntityKind, Status};
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Content directory not found: {0}")]
    MissingContentDir(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        #[source]
        source: FrontmatterError,
    },

    #[error("{path}: {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },

    #[error("{path}: does not match any document type (articles/**, authors/*, categories/*)")]
    UnknownDocumentType { path: String },

    #[error("Duplicate {kind} slug: {slug}")]
    DuplicateSlug { kind: EntityKind, slug: String },
}

/// One content file, with its path relative to the content directory
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Slash-separated relative path (e.g., "articles/2024/budget.mdx")
    pub path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Loads a content directory into an immutable [`ContentStore`]
pub struct ContentLoader {
    config: Config,
}

impl ContentLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load every document under the content directory
    ///
    /// Fails on the first invalid document; no partial store is returned.
    pub fn load(&self) -> Result<ContentStore, LoadError> {
        let content_dir = self.config.content_dir();
        if !content_dir.is_dir() {
            return Err(LoadError::MissingContentDir(content_dir));
        }

        let files = self.discover_content_files(&content_dir)?;
        tracing::info!("Found {} content files in {:?}", files.len(), content_dir);

        let mut sources = Vec::with_capacity(files.len());
        for (path, rel) in files {
            let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            sources.push(SourceFile::new(rel, content));
        }

        self.load_sources(sources)
    }

    /// Load documents that are already in memory, in the given order
    pub fn load_sources<I>(&self, sources: I) -> Result<ContentStore, LoadError>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut articles = Vec::new();
        let mut authors = Vec::new();
        let mut categories = Vec::new();
        let mut diagnostics = Vec::new();

        for source in sources {
            let kind = classify(&source.path).ok_or_else(|| LoadError::UnknownDocumentType {
                path: source.path.clone(),
            })?;
            tracing::debug!("Parsing {} as {}", source.path, kind);

            let (raw, body) =
                parse_frontmatter(&source.content).map_err(|e| LoadError::Frontmatter {
                    path: source.path.clone(),
                    source: e,
                })?;

            let schema = DocumentSchema::for_kind(kind);
            let schema_err = |e: SchemaError| LoadError::Schema {
                path: source.path.clone(),
                source: e,
            };
            let fields = schema.validate(&raw).map_err(schema_err)?;

            let slug = match kind {
                EntityKind::Article => {
                    let article = self.parse_article(&fields, body, &source.path).map_err(schema_err)?;
                    let slug = article.slug.clone();
                    articles.push(article);
                    slug
                }
                EntityKind::Author => {
                    let author = parse_author(&fields, body, &source.path).map_err(schema_err)?;
                    let slug = author.slug.clone();
                    authors.push(author);
                    slug
                }
                EntityKind::Category => {
                    let category = parse_category(&fields, &source.path).map_err(schema_err)?;
                    let slug = category.slug.clone();
                    categories.push(category);
                    slug
                }
            };

            for field in fields.unknown() {
                diagnostics.push(Diagnostic {
                    code: "field.unknown".to_string(),
                    message: format!("Field `{}` is not part of the {} schema", field, kind),
                    severity: DiagnosticSeverity::Info,
                    kind,
                    slug: Some(slug.clone()),
                    source_path: Some(source.path.clone()),
                });
            }
        }

        let articles = Collection::from_vec(articles).map_err(|slug| LoadError::DuplicateSlug {
            kind: EntityKind::Article,
            slug,
        })?;
        let authors = Collection::from_vec(authors).map_err(|slug| LoadError::DuplicateSlug {
            kind: EntityKind::Author,
            slug,
        })?;
        let categories =
            Collection::from_vec(categories).map_err(|slug| LoadError::DuplicateSlug {
                kind: EntityKind::Category,
                slug,
            })?;

        let mut store = ContentStore {
            articles,
            authors,
            categories,
            diagnostics,
        };
        let mut references = check_references(&store);
        store.diagnostics.append(&mut references);

        for diag in store.warnings() {
            tracing::warn!("{}", diag.message);
        }
        tracing::info!(
            "Loaded {} articles, {} authors, {} categories",
            store.articles.len(),
            store.authors.len(),
            store.categories.len()
        );

        Ok(store)
    }

    /// Discover all content documents, sorted by path for deterministic order
    ///
    /// Any directory or link that cannot be walked fails discovery.
    fn discover_content_files(&self, content_dir: &Path) -> Result<Vec<(PathBuf, String)>, LoadError> {
        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);
        let mut files = Vec::new();

        for entry in WalkDir::new(content_dir).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_content_extension(entry.path()) {
                continue;
            }

            let Some(rel) = relative_slash_path(entry.path(), content_dir) else {
                continue;
            };
            if should_ignore(&rel, &ignore_patterns) {
                tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                continue;
            }

            files.push((entry.path().to_path_buf(), rel));
        }

        Ok(files)
    }

    /// Build an Article from validated fields and compute derived fields
    fn parse_article(&self, fields: &Fields, body: String, path: &str) -> Result<Article, SchemaError> {
        let slug = fields.require_string("slug")?;

        let status = match fields.string("status") {
            None => Status::Draft,
            Some(raw) => Status::from_str(raw).ok_or_else(|| SchemaError::InvalidValue {
                field: "status".to_string(),
                value: raw.to_string(),
                reason: "expected `draft` or `published`".to_string(),
            })?,
        };

        let featured_image = fields.owned_string("featuredImage").map(|src| FeaturedImage {
            src,
            caption: fields.owned_string("featuredImageCaption"),
            credit: fields.owned_string("featuredImageCredit"),
        });

        let scoreline = Scoreline {
            sport: fields.owned_string("sport"),
            opponent: fields.owned_string("opponent"),
            home_team: fields.owned_string("homeTeam"),
            away_team: fields.owned_string("awayTeam"),
            home_score: fields.number("homeScore"),
            away_score: fields.number("awayScore"),
        };

        let words = word_count(&body);

        Ok(Article {
            url: EntityKind::Article.url_for(&slug),
            title: fields.require_string("title")?,
            date: fields.require_date("date")?,
            updated_at: fields.date("updatedAt"),
            category: fields.require_string("category")?,
            subcategory: fields.owned_string("subcategory"),
            dek: fields.owned_string("dek"),
            authors: fields.list("authors").unwrap_or_default().to_vec(),
            tags: fields.list("tags").unwrap_or_default().to_vec(),
            featured_image,
            scoreline,
            is_opinion: fields.boolean("isOpinion").unwrap_or(false),
            featured: fields.boolean("featured").unwrap_or(false),
            status,
            word_count: words,
            estimated_read_time: estimated_read_time(words, self.config.words_per_minute),
            body,
            source_path: Some(path.to_string()),
            slug,
        })
    }
}

fn parse_author(fields: &Fields, body: String, path: &str) -> Result<Author, SchemaError> {
    let slug = fields.require_string("slug")?;
    Ok(Author {
        url: EntityKind::Author.url_for(&slug),
        name: fields.require_string("name")?,
        role: fields.owned_string("role"),
        bio: fields.owned_string("bio"),
        avatar: fields.owned_string("avatar"),
        twitter: fields.owned_string("twitter"),
        body,
        source_path: Some(path.to_string()),
        slug,
    })
}

fn parse_category(fields: &Fields, path: &str) -> Result<Category, SchemaError> {
    let slug = fields.require_string("slug")?;
    Ok(Category {
        url: EntityKind::Category.url_for(&slug),
        name: fields.require_string("name")?,
        parent: fields.owned_string("parent"),
        description: fields.owned_string("description"),
        source_path: Some(path.to_string()),
        slug,
    })
}

/// Determine the document kind from a content-relative path
///
/// Articles may be nested (`articles/**/*.mdx`); authors and categories must
/// sit directly in their directory.
pub fn classify(rel_path: &str) -> Option<EntityKind> {
    if !is_content_extension(Path::new(rel_path)) {
        return None;
    }

    let parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();
    let (dir, rest) = parts.split_first()?;

    EntityKind::ALL.into_iter().find(|kind| {
        kind.directory() == *dir && !rest.is_empty() && (kind.recursive() || rest.len() == 1)
    })
}

fn is_content_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx")
    )
}

fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Soft cross-reference checks; problems here never fail the load
fn check_references(store: &ContentStore) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for article in &store.articles {
        for author in &article.authors {
            if !store.authors.contains(author) {
                diagnostics.push(warning(
                    "author.unresolved",
                    format!(
                        "Article '{}' credits unknown author '{}'",
                        article.slug, author
                    ),
                    EntityKind::Article,
                    &article.slug,
                    article.source_path.as_deref(),
                ));
            }
        }

        if !store.categories.contains(&article.category) {
            diagnostics.push(warning(
                "category.unknown",
                format!(
                    "Article '{}' is filed under unknown category '{}'",
                    article.slug, article.category
                ),
                EntityKind::Article,
                &article.slug,
                article.source_path.as_deref(),
            ));
        }
    }

    for category in &store.categories {
        if let Some(parent) = &category.parent {
            if !store.categories.contains(parent) {
                diagnostics.push(warning(
                    "category.parent_unknown",
                    format!(
                        "Category '{}' has unknown parent '{}'",
                        category.slug, parent
                    ),
                    EntityKind::Category,
                    &category.slug,
                    category.source_path.as_deref(),
                ));
            }
        }
    }

    let slugs = store
        .articles
        .iter()
        .map(|a| (EntityKind::Article, a.slug.as_str(), a.source_path.as_deref()))
        .chain(
            store
                .authors
                .iter()
                .map(|a| (EntityKind::Author, a.slug.as_str(), a.source_path.as_deref())),
        )
        .chain(
            store
                .categories
                .iter()
                .map(|c| (EntityKind::Category, c.slug.as_str(), c.source_path.as_deref())),
        );
    for (kind, slug, source_path) in slugs {
        if !is_canonical_slug(slug) {
            diagnostics.push(warning(
                "slug.noncanonical",
                format!("The {} slug '{}' is not URL-safe", kind, slug),
                kind,
                slug,
                source_path,
            ));
        }
    }

    diagnostics
}

fn warning(
    code: &str,
    message: String,
    kind: EntityKind,
    slug: &str,
    source_path: Option<&str>,
) -> Diagnostic {
    Diagnostic {
        code: code.to_string(),
        message,
        severity: DiagnosticSeverity::Warning,
        kind,
        slug: Some(slug.to_string()),
        source_path: source_path.map(str::to_string),
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}
