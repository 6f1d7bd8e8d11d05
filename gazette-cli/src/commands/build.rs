//! Build command implementation.

use crate::output::{summarize_all, ArticleSummary};
use crate::site::load_site;
use anyhow::{Context, Result};
use chrono::Local;
use gazette_core::{query, sitemap, tag_url, Config, ContentStore};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load all content and write the data files page templates consume, plus sitemap.xml and robots.txt
pub fn build_site(config_path: &Path) -> Result<()> {
    let (config, store) = load_site(config_path)?;

    tracing::info!("Building site: {}", config.site.title);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    let published = query::list_published(&store.articles);

    write_json(&output_dir, "store.json", &store)?;
    write_json(
        &output_dir,
        "articles.json",
        &summarize_all(&store.authors, &published),
    )?;
    generate_archive_json(&output_dir, &store, &published)?;
    generate_tags_json(&output_dir, &store, &published)?;
    generate_sitemap(&output_dir, &config, &store)?;
    generate_robots(&output_dir, &config)?;

    tracing::info!(
        "Wrote {} published articles to {:?}",
        published.len(),
        output_dir
    );
    Ok(())
}

#[derive(Serialize)]
struct ArchiveMonth<'a> {
    label: &'a str,
    articles: Vec<ArticleSummary<'a>>,
}

fn generate_archive_json(
    output_dir: &Path,
    store: &ContentStore,
    published: &[&gazette_core::Article],
) -> Result<()> {
    let groups = query::group_by_month(published);
    let archive: Vec<ArchiveMonth> = groups
        .iter()
        .map(|g| ArchiveMonth {
            label: &g.label,
            articles: summarize_all(&store.authors, &g.articles),
        })
        .collect();

    write_json(output_dir, "archive.json", &archive)?;
    tracing::info!("Generated archive.json with {} months", archive.len());
    Ok(())
}

#[derive(Serialize)]
struct TagEntry<'a> {
    tag: &'a str,
    url: String,
    count: usize,
}

fn generate_tags_json(
    output_dir: &Path,
    store: &ContentStore,
    published: &[&gazette_core::Article],
) -> Result<()> {
    let tags: Vec<TagEntry> = query::all_tags(&store.articles)
        .into_iter()
        .map(|tag| TagEntry {
            tag,
            url: tag_url(tag),
            count: query::find_by_tag(published.iter().copied(), tag).len(),
        })
        .collect();

    write_json(output_dir, "tags.json", &tags)?;
    tracing::info!("Generated tags.json with {} tags", tags.len());
    Ok(())
}

fn generate_sitemap(output_dir: &Path, config: &Config, store: &ContentStore) -> Result<()> {
    let today = Local::now().date_naive();
    let entries = sitemap::build_sitemap(store, config, today);

    fs::write(output_dir.join("sitemap.xml"), sitemap::render_xml(&entries))
        .context("Failed to write sitemap.xml")?;
    tracing::info!("Generated sitemap.xml with {} urls", entries.len());
    Ok(())
}

fn generate_robots(output_dir: &Path, config: &Config) -> Result<()> {
    fs::write(output_dir.join("robots.txt"), sitemap::render_robots(config))
        .context("Failed to write robots.txt")?;
    tracing::info!("Generated robots.txt");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(output_dir: &Path, name: &str, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .with_context(|| format!("Failed to serialize {}", name))?;
    fs::write(output_dir.join(name), json).with_context(|| format!("Failed to write {}", name))?;
    Ok(())
}
