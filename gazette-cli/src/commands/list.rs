//! Article listings: filtered lists, the monthly archive, and search.

use crate::output::{article_line, print_json, summarize_all, ArticleSummary};
use crate::site::load_site;
use anyhow::Result;
use gazette_core::{query, Article};
use serde::Serialize;
use std::path::Path;

/// Optional narrowing for `gazette list`; filters combine with AND
#[derive(Debug, Default)]
pub struct ListFilter {
    pub author: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl ListFilter {
    fn apply<'a>(&self, mut articles: Vec<&'a Article>) -> Vec<&'a Article> {
        if let Some(author) = &self.author {
            articles = query::find_by_author(articles, author);
        }
        if let Some(category) = &self.category {
            articles = query::find_by_category(articles, category);
        }
        if let Some(tag) = &self.tag {
            articles = query::find_by_tag(articles, tag);
        }
        articles
    }
}

/// Print published articles, newest first.
pub fn list_articles(config_path: &Path, filter: &ListFilter, json: bool) -> Result<()> {
    let (_config, store) = load_site(config_path)?;
    let articles = filter.apply(query::list_published(&store.articles));

    if json {
        return print_json("articles.list", summarize_all(&store.authors, &articles));
    }

    if articles.is_empty() {
        println!("No articles.");
        return Ok(());
    }
    for article in &articles {
        println!("{}", article_line(&store.authors, article));
    }

    Ok(())
}

#[derive(Serialize)]
struct MonthData<'a> {
    label: &'a str,
    year: i32,
    month: u32,
    articles: Vec<ArticleSummary<'a>>,
}

/// Print published articles grouped by month.
pub fn show_archive(config_path: &Path, json: bool) -> Result<()> {
    let (_config, store) = load_site(config_path)?;
    let published = query::list_published(&store.articles);
    let groups = query::group_by_month(&published);

    if json {
        let data: Vec<MonthData> = groups
            .iter()
            .map(|g| MonthData {
                label: &g.label,
                year: g.year,
                month: g.month,
                articles: summarize_all(&store.authors, &g.articles),
            })
            .collect();
        return print_json("articles.archive", data);
    }

    println!("{} published articles", published.len());
    for group in &groups {
        println!("\n{}", group.label);
        for article in &group.articles {
            println!("  {}", article_line(&store.authors, article));
        }
    }

    Ok(())
}

/// Print published articles matching a query.
pub fn search_articles(config_path: &Path, query_text: &str, json: bool) -> Result<()> {
    let (_config, store) = load_site(config_path)?;
    let published = query::list_published(&store.articles);
    let results = query::search(published, query_text);

    if json {
        return print_json("articles.search", summarize_all(&store.authors, &results));
    }

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    for article in &results {
        println!("{}", article_line(&store.authors, article));
    }

    Ok(())
}
