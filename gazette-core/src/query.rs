//! Read-only queries over loaded content.
//!
//! Every function here is pure: it borrows collections, never mutates them,
//! and returns an empty list or `None` instead of failing. Filters keep their
//! input order, so passing the output of [`list_published`] yields newest-first
//! results.

use crate::models::{Article, Author, Category, Collection, Keyed};
use chrono::Datelike;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Articles shown on an article page under "Related Articles"
pub const RELATED_LIMIT: usize = 3;

/// Number of secondary stories next to the lead on the home page
pub const SECONDARY_STORIES: usize = 2;

/// Published articles, newest first
///
/// The sort is stable: articles sharing a date keep their collection order.
pub fn list_published<'a, I>(articles: I) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut published: Vec<&Article> = articles.into_iter().filter(|a| a.is_published()).collect();
    published.sort_by(|a, b| b.date.cmp(&a.date));
    published
}

/// Articles of one calendar month
#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<'a> {
    /// Display label, e.g. "January 2024"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub articles: Vec<&'a Article>,
}

/// Group articles by publication month, in order of first appearance
///
/// For newest-first input the groups come out newest-first, and concatenating
/// them reproduces the input exactly.
pub fn group_by_month<'a>(articles: &[&'a Article]) -> Vec<MonthGroup<'a>> {
    let mut groups: Vec<MonthGroup<'a>> = Vec::new();
    let mut positions: HashMap<(i32, u32), usize> = HashMap::new();

    for &article in articles {
        let key = (article.date.year(), article.date.month());
        let pos = *positions.entry(key).or_insert_with(|| {
            groups.push(MonthGroup {
                label: article.date.format("%B %Y").to_string(),
                year: key.0,
                month: key.1,
                articles: Vec::new(),
            });
            groups.len() - 1
        });
        groups[pos].articles.push(article);
    }

    groups
}

/// Exact lookup by slug
pub fn find_by_slug<'a, T: Keyed>(collection: &'a Collection<T>, slug: &str) -> Option<&'a T> {
    collection.get(slug)
}

/// Published articles crediting an author
pub fn find_by_author<'a, I>(articles: I, author_slug: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles
        .into_iter()
        .filter(|a| a.is_published() && a.has_author(author_slug))
        .collect()
}

/// Published articles filed under a category
pub fn find_by_category<'a, I>(articles: I, category_slug: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles
        .into_iter()
        .filter(|a| a.is_published() && a.category == category_slug)
        .collect()
}

/// Published articles carrying a tag (exact, case-sensitive)
pub fn find_by_tag<'a, I>(articles: I, tag: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles
        .into_iter()
        .filter(|a| a.is_published() && a.has_tag(tag))
        .collect()
}

/// Chronological neighbors of an article
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Neighbors<'a> {
    /// The next older article
    pub previous: Option<&'a Article>,
    /// The next newer article
    pub next: Option<&'a Article>,
}

/// Find the older and newer neighbors of `current_slug` in a newest-first list
///
/// An article that is not in the list has no neighbors.
pub fn neighbors<'a>(sorted: &[&'a Article], current_slug: &str) -> Neighbors<'a> {
    let Some(pos) = sorted.iter().position(|a| a.slug == current_slug) else {
        return Neighbors::default();
    };

    Neighbors {
        previous: sorted.get(pos + 1).copied(),
        next: pos.checked_sub(1).and_then(|i| sorted.get(i).copied()),
    }
}

/// Articles related to `current`
///
/// An article qualifies when it is published, is not `current`, and shares
/// the category, an author or a tag. Qualifying articles are taken in input
/// order without ranking, up to `limit`.
pub fn related_articles<'a, I>(current: &Article, articles: I, limit: usize) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    articles
        .into_iter()
        .filter(|a| a.is_published() && a.slug != current.slug)
        .filter(|a| {
            a.category == current.category
                || a.authors.iter().any(|author| current.has_author(author))
                || a.tags.iter().any(|tag| current.has_tag(tag))
        })
        .take(limit)
        .collect()
}

/// Display name for an author reference, falling back to the raw slug
pub fn author_name<'a>(authors: &'a Collection<Author>, slug: &'a str) -> &'a str {
    authors.get(slug).map_or(slug, |a| a.name.as_str())
}

/// One entry of an article's byline
#[derive(Debug, Clone, Serialize)]
pub struct Byline<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    /// Profile URL when the author is known
    pub url: Option<&'a str>,
}

/// Resolve an article's author references in byline order
pub fn byline<'a>(authors: &'a Collection<Author>, article: &'a Article) -> Vec<Byline<'a>> {
    article
        .authors
        .iter()
        .map(|slug| {
            let author = authors.get(slug);
            Byline {
                slug,
                name: author.map_or(slug.as_str(), |a| a.name.as_str()),
                url: author.map(|a| a.url.as_str()),
            }
        })
        .collect()
}

/// Distinct tags of published articles, in order of first appearance
pub fn all_tags<'a, I>(articles: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| a.is_published())
        .flat_map(|a| a.tags.iter().map(String::as_str))
        .filter(|tag| seen.insert(*tag))
        .collect()
}

/// Categories sorted by display name, for site navigation
pub fn categories_by_name(categories: &Collection<Category>) -> Vec<&Category> {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

/// Direct children of a category
pub fn subcategories<'a>(categories: &'a Collection<Category>, parent: &str) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|c| c.parent.as_deref() == Some(parent))
        .collect()
}

/// Home page layout: one lead story, a couple of secondary stories, the rest
#[derive(Debug, Clone, Default, Serialize)]
pub struct HomeFeed<'a> {
    pub lead: Option<&'a Article>,
    pub secondary: Vec<&'a Article>,
    pub rest: Vec<&'a Article>,
}

/// Split a newest-first list into the home page sections
pub fn home_feed<'a>(published: &[&'a Article]) -> HomeFeed<'a> {
    let Some((&lead, others)) = published.split_first() else {
        return HomeFeed::default();
    };
    let split = others.len().min(SECONDARY_STORIES);

    HomeFeed {
        lead: Some(lead),
        secondary: others[..split].to_vec(),
        rest: others[split..].to_vec(),
    }
}

/// Published articles whose title, dek or category contains `query`
///
/// Matching is a case-insensitive substring test; a blank query matches nothing.
pub fn search<'a, I>(articles: I, query: &str) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    articles
        .into_iter()
        .filter(|a| a.is_published())
        .filter(|a| {
            a.title.to_lowercase().contains(&needle)
                || a.dek
                    .as_deref()
                    .is_some_and(|dek| dek.to_lowercase().contains(&needle))
                || a.category.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{article, author, category};
    use gazette_types::Status;

    fn slugs(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.slug.clone()).collect()
    }

    /// A(2024-01-10, news), B(2024-01-05, news), C(2024-02-01, sports)
    fn scenario() -> Vec<Article> {
        vec![
            article("a", "2024-01-10", "news"),
            article("b", "2024-01-05", "news"),
            article("c", "2024-02-01", "sports"),
        ]
    }

    #[test]
    fn test_list_published_scenario() {
        let articles = scenario();
        assert_eq!(slugs(&list_published(&articles)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_group_by_month_scenario() {
        let articles = scenario();
        let published = list_published(&articles);
        let groups = group_by_month(&published);

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["February 2024", "January 2024"]);
        assert_eq!(slugs(&groups[0].articles), vec!["c"]);
        assert_eq!(slugs(&groups[1].articles), vec!["a", "b"]);
        assert_eq!((groups[1].year, groups[1].month), (2024, 1));
    }

    #[test]
    fn test_related_scenario() {
        let articles = scenario();
        let related = related_articles(&articles[0], &articles, RELATED_LIMIT);
        assert_eq!(slugs(&related), vec!["b"]);
    }

    #[test]
    fn test_list_published_excludes_drafts_and_is_stable() {
        let mut articles = vec![
            article("first", "2024-03-01", "news"),
            article("draft", "2024-05-01", "news"),
            article("second", "2024-03-01", "news"),
            article("older", "2023-12-31", "news"),
            article("third", "2024-03-01", "news"),
        ];
        articles[1].status = Status::Draft;

        let published = list_published(&articles);
        assert_eq!(slugs(&published), vec!["first", "second", "third", "older"]);
        assert!(published.iter().all(|a| a.status == Status::Published));
        assert!(published.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_group_by_month_partition_law() {
        let articles = vec![
            article("d1", "2023-11-30", "news"),
            article("d2", "2024-01-01", "news"),
            article("d3", "2023-11-01", "news"),
            article("d4", "2024-01-31", "news"),
            article("d5", "2022-11-15", "news"),
        ];
        let published = list_published(&articles);
        let groups = group_by_month(&published);

        let flattened: Vec<&Article> = groups.iter().flat_map(|g| g.articles.clone()).collect();
        assert_eq!(slugs(&flattened), slugs(&published));
        // Same month in different years stays separate
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["January 2024", "November 2023", "November 2022"]);
    }

    #[test]
    fn test_group_by_month_empty() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn test_find_by_slug() {
        let articles = Collection::from_vec(scenario()).unwrap();
        assert_eq!(find_by_slug(&articles, "b").map(|a| a.slug.as_str()), Some("b"));
        assert!(find_by_slug(&articles, "nonexistent-slug").is_none());
        // Never a partial match
        assert!(find_by_slug(&articles, "a ").is_none());
    }

    #[test]
    fn test_find_by_author() {
        let mut articles = scenario();
        articles[0].authors = vec!["jane-doe".into(), "sam-lee".into()];
        articles[2].authors = vec!["sam-lee".into()];
        articles[1].authors = vec!["sam-lee".into()];
        articles[1].status = Status::Draft;

        assert_eq!(slugs(&find_by_author(&articles, "sam-lee")), vec!["a", "c"]);
        assert_eq!(slugs(&find_by_author(&articles, "jane-doe")), vec!["a"]);
        assert!(find_by_author(&articles, "nobody").is_empty());
    }

    #[test]
    fn test_find_by_category() {
        let articles = scenario();
        let published = list_published(&articles);
        assert_eq!(
            slugs(&find_by_category(published.iter().copied(), "news")),
            vec!["a", "b"]
        );
        assert!(find_by_category(&articles, "weather").is_empty());
    }

    #[test]
    fn test_find_by_tag_is_exact() {
        let mut articles = scenario();
        articles[0].tags = vec!["Elections".into()];
        articles[1].tags = vec!["elections".into(), "council".into()];

        assert_eq!(slugs(&find_by_tag(&articles, "elections")), vec!["b"]);
        assert_eq!(slugs(&find_by_tag(&articles, "Elections")), vec!["a"]);
        assert!(find_by_tag(&articles, "election").is_empty());
    }

    #[test]
    fn test_neighbors() {
        let articles = scenario();
        let sorted = list_published(&articles); // c, a, b

        let middle = neighbors(&sorted, "a");
        assert_eq!(middle.previous.map(|a| a.slug.as_str()), Some("b"));
        assert_eq!(middle.next.map(|a| a.slug.as_str()), Some("c"));

        let newest = neighbors(&sorted, "c");
        assert!(newest.next.is_none());
        assert_eq!(newest.previous.map(|a| a.slug.as_str()), Some("a"));

        let oldest = neighbors(&sorted, "b");
        assert!(oldest.previous.is_none());
        assert_eq!(oldest.next.map(|a| a.slug.as_str()), Some("a"));

        let missing = neighbors(&sorted, "nonexistent-slug");
        assert!(missing.previous.is_none() && missing.next.is_none());
    }

    #[test]
    fn test_related_excludes_self_and_drafts() {
        let mut articles = vec![
            article("current", "2024-01-10", "news"),
            article("draft-same-category", "2024-01-09", "news"),
            article("shared-tag", "2024-01-08", "sports"),
            article("shared-author", "2024-01-07", "arts"),
            article("unrelated", "2024-01-06", "weather"),
            article("same-category", "2024-01-05", "news"),
        ];
        articles[0].tags = vec!["derby".into()];
        articles[0].authors = vec!["jane-doe".into()];
        articles[1].status = Status::Draft;
        articles[2].tags = vec!["derby".into()];
        articles[3].authors = vec!["jane-doe".into()];

        let related = related_articles(&articles[0], &articles, 10);
        assert_eq!(
            slugs(&related),
            vec!["shared-tag", "shared-author", "same-category"]
        );

        let limited = related_articles(&articles[0], &articles, 2);
        assert_eq!(slugs(&limited), vec!["shared-tag", "shared-author"]);

        assert!(related_articles(&articles[0], &articles, 0).is_empty());
    }

    #[test]
    fn test_author_name_falls_back_to_slug() {
        let authors = Collection::from_vec(vec![author("jane-doe", "Jane Doe")]).unwrap();
        assert_eq!(author_name(&authors, "jane-doe"), "Jane Doe");
        assert_eq!(author_name(&authors, "ghost-writer"), "ghost-writer");
    }

    #[test]
    fn test_byline() {
        let authors = Collection::from_vec(vec![author("jane-doe", "Jane Doe")]).unwrap();
        let mut a = article("a", "2024-01-10", "news");
        a.authors = vec!["jane-doe".into(), "guest".into()];

        let line = byline(&authors, &a);
        assert_eq!(line.len(), 2);
        assert_eq!(line[0].name, "Jane Doe");
        assert_eq!(line[0].url, Some("/authors/jane-doe"));
        assert_eq!(line[1].name, "guest");
        assert_eq!(line[1].url, None);
    }

    #[test]
    fn test_all_tags() {
        let mut articles = scenario();
        articles[0].tags = vec!["council".into(), "budget".into()];
        articles[1].tags = vec!["budget".into(), "secret".into()];
        articles[1].status = Status::Draft;
        articles[2].tags = vec!["derby".into(), "council".into()];

        assert_eq!(all_tags(&articles), vec!["council", "budget", "derby"]);
    }

    #[test]
    fn test_categories() {
        let categories = Collection::from_vec(vec![
            category("sports", "Sports", None),
            category("high-school", "High School", Some("sports")),
            category("arts", "Arts", None),
        ])
        .unwrap();

        let names: Vec<&str> = categories_by_name(&categories)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Arts", "High School", "Sports"]);

        let children = subcategories(&categories, "sports");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].slug, "high-school");
        assert!(subcategories(&categories, "arts").is_empty());
    }

    #[test]
    fn test_home_feed() {
        let articles = vec![
            article("one", "2024-01-05", "news"),
            article("two", "2024-01-04", "news"),
            article("three", "2024-01-03", "news"),
            article("four", "2024-01-02", "news"),
        ];
        let published = list_published(&articles);

        let feed = home_feed(&published);
        assert_eq!(feed.lead.map(|a| a.slug.as_str()), Some("one"));
        assert_eq!(slugs(&feed.secondary), vec!["two", "three"]);
        assert_eq!(slugs(&feed.rest), vec!["four"]);

        let short = home_feed(&published[..2]);
        assert_eq!(slugs(&short.secondary), vec!["two"]);
        assert!(short.rest.is_empty());

        let empty = home_feed(&[]);
        assert!(empty.lead.is_none() && empty.secondary.is_empty());
    }

    #[test]
    fn test_search() {
        let mut articles = scenario();
        articles[0].title = "Council Passes Budget".into();
        articles[1].dek = Some("The budget debate ran late".into());
        articles[2].title = "Budget cuts hit sports".into();
        articles[2].status = Status::Draft;

        assert_eq!(slugs(&search(&articles, "budget")), vec!["a", "b"]);
        assert_eq!(slugs(&search(&articles, "NEWS")), vec!["a", "b"]);
        assert!(search(&articles, "   ").is_empty());
        assert!(search(&articles, "weather").is_empty());
    }
}
