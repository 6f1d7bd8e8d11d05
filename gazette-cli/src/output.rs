//! Shared JSON payloads and text formatting for command output.

use gazette_core::{query, Article, Author, Collection};
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "gazette-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

/// Article preview as shown in lists and cards
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub date: String,
    pub category: &'a str,
    pub dek: Option<&'a str>,
    pub authors: Vec<query::Byline<'a>>,
    pub tags: &'a [String],
    pub estimated_read_time: usize,
}

pub fn summarize<'a>(authors: &'a Collection<Author>, article: &'a Article) -> ArticleSummary<'a> {
    ArticleSummary {
        slug: &article.slug,
        title: &article.title,
        url: &article.url,
        date: article.date.format("%Y-%m-%d").to_string(),
        category: &article.category,
        dek: article.dek.as_deref(),
        authors: query::byline(authors, article),
        tags: &article.tags,
        estimated_read_time: article.estimated_read_time,
    }
}

pub fn summarize_all<'a>(
    authors: &'a Collection<Author>,
    articles: &[&'a Article],
) -> Vec<ArticleSummary<'a>> {
    articles.iter().map(|&a| summarize(authors, a)).collect()
}

/// One-line text rendering: date, title, lead author, slug
pub fn article_line(authors: &Collection<Author>, article: &Article) -> String {
    let lead = article
        .authors
        .first()
        .map(|slug| query::author_name(authors, slug))
        .unwrap_or("unknown");
    format!(
        "{}  {}  ({}, {} min)  [{}]",
        article.date.format("%b %-d, %Y"),
        article.title,
        lead,
        article.estimated_read_time,
        article.slug
    )
}

pub fn print_json<T: Serialize>(kind: &'static str, data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&envelope(kind, data))?);
    Ok(())
}
