//! Sitemap entries for published content, and the robots.txt that points at them.

use crate::{config::Config, models::ContentStore, query::list_published};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Sitemap for the home page, archive, published articles, authors and categories
///
/// `today` stands in for the modification date of pages that have none of
/// their own.
pub fn build_sitemap(store: &ContentStore, config: &Config, today: NaiveDate) -> Vec<SitemapEntry> {
    let base_url = config.normalized_base_url();
    let entry = |path: &str,
                 last_modified: NaiveDate,
                 change_frequency: ChangeFrequency,
                 priority: f32| SitemapEntry {
        loc: absolute_url(&config.site.url, &base_url, path),
        last_modified,
        change_frequency,
        priority,
    };

    let mut entries = vec![
        entry("", today, ChangeFrequency::Daily, 1.0),
        entry("/archive", today, ChangeFrequency::Daily, 0.9),
    ];

    entries.extend(
        list_published(&store.articles)
            .into_iter()
            .map(|a| entry(&a.url, a.last_modified(), ChangeFrequency::Weekly, 0.8)),
    );
    entries.extend(
        store
            .authors
            .iter()
            .map(|a| entry(&a.url, today, ChangeFrequency::Monthly, 0.6)),
    );
    entries.extend(
        store
            .categories
            .iter()
            .map(|c| entry(&c.url, today, ChangeFrequency::Weekly, 0.7)),
    );

    entries
}

/// Render entries as a sitemaps.org XML document
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut urls = String::new();

    for entry in entries {
        urls.push_str("<url>");
        urls.push_str(&format!("<loc>{}</loc>", escape_xml(&entry.loc)));
        urls.push_str(&format!(
            "<lastmod>{}</lastmod>",
            entry.last_modified.format("%Y-%m-%d")
        ));
        urls.push_str(&format!(
            "<changefreq>{}</changefreq>",
            entry.change_frequency.as_str()
        ));
        urls.push_str(&format!("<priority>{:.1}</priority>", entry.priority));
        urls.push_str("</url>\n");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}</urlset>
"#,
        urls
    )
}

/// Crawler rules: everything but `/api/` is open, plus the sitemap location
pub fn render_robots(config: &Config) -> String {
    let sitemap = absolute_url(&config.site.url, &config.normalized_base_url(), "sitemap.xml");
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {}\n",
        sitemap
    )
}

fn absolute_url(site_url: &str, base_url: &str, rel: &str) -> String {
    let root = site_url.trim_end_matches('/');
    let base = base_url.trim_matches('/');
    let rel = rel.trim_start_matches('/');

    [root, base, rel]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
