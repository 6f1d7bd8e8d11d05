//! Show a single article the way its page needs it.

use crate::output::{article_line, print_json, summarize, summarize_all, ArticleSummary};
use crate::site::load_site;
use anyhow::{Context, Result};
use gazette_core::{query, tag_url, Article};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticlePage<'a> {
    article: &'a Article,
    byline: Vec<query::Byline<'a>>,
    category_name: Option<&'a str>,
    tag_urls: Vec<String>,
    previous: Option<ArticleSummary<'a>>,
    next: Option<ArticleSummary<'a>>,
    related: Vec<ArticleSummary<'a>>,
}

/// Print an article with its byline, previous/next navigation and related articles.
///
/// Drafts are treated as missing.
pub fn show_article(config_path: &Path, slug: &str, json: bool) -> Result<()> {
    let (config, store) = load_site(config_path)?;

    let article = query::find_by_slug(&store.articles, slug)
        .filter(|a| a.is_published())
        .with_context(|| format!("Article '{}' not found", slug))?;

    let published = query::list_published(&store.articles);
    let neighbors = query::neighbors(&published, &article.slug);
    let related = query::related_articles(article, published.iter().copied(), config.related_limit);
    let byline = query::byline(&store.authors, article);

    if json {
        let page = ArticlePage {
            article,
            byline,
            category_name: store.category(&article.category).map(|c| c.name.as_str()),
            tag_urls: article.tags.iter().map(|t| tag_url(t)).collect(),
            previous: neighbors.previous.map(|a| summarize(&store.authors, a)),
            next: neighbors.next.map(|a| summarize(&store.authors, a)),
            related: summarize_all(&store.authors, &related),
        };
        return print_json("article.page", page);
    }

    println!("{}", article.title);
    if let Some(dek) = &article.dek {
        println!("{}", dek);
    }
    let names: Vec<&str> = byline.iter().map(|b| b.name).collect();
    println!(
        "By {} | {} | {} min read",
        names.join(", "),
        article.date.format("%B %-d, %Y"),
        article.estimated_read_time
    );
    let category = query::find_by_slug(&store.categories, &article.category)
        .map_or(article.category.as_str(), |c| c.name.as_str());
    println!("Category: {}", category);
    if !article.tags.is_empty() {
        println!("Tags: {}", article.tags.join(", "));
    }

    if let Some(previous) = neighbors.previous {
        println!("\nPrevious: {}", article_line(&store.authors, previous));
    }
    if let Some(next) = neighbors.next {
        println!("Next: {}", article_line(&store.authors, next));
    }

    if !related.is_empty() {
        println!("\nRelated Articles");
        for r in &related {
            println!("  {}", article_line(&store.authors, r));
        }
    }

    Ok(())
}
