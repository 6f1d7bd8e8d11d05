//! Integration tests for loading a content directory and querying it
//!
//! These tests lay out a content tree on disk and go through the same path
//! the CLI does: config, loader, store, queries.

use gazette_core::{query, Config, ContentLoader, LoadError, Status};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn article(slug: &str, date: &str, category: &str, extra: &str, body: &str) -> String {
    format!(
        "---\ntitle: {slug} title\nslug: {slug}\ndate: {date}\ncategory: {category}\nauthors:\n  - jane-doe\nstatus: published\n{extra}---\n{body}\n"
    )
}

/// The three-article scenario: A(2024-01-10, news), B(2024-01-05, news), C(2024-02-01, sports)
fn scenario_site() -> TempDir {
    let dir = tempdir().unwrap();
    let content = dir.path().join("content");

    write(
        &content,
        "authors/jane-doe.mdx",
        "---\nname: Jane Doe\nslug: jane-doe\nrole: Senior Reporter\ntwitter: janedoe\n---\nJane has covered city hall since 2015.\n",
    );
    write(
        &content,
        "authors/sam-lee.mdx",
        "---\nname: Sam Lee\nslug: sam-lee\nrole: Sports Editor\n---\n",
    );
    write(&content, "categories/news.mdx", "---\nname: News\nslug: news\n---\n");
    write(
        &content,
        "categories/sports.mdx",
        "---\nname: Sports\nslug: sports\ndescription: Scores and stories\n---\n",
    );
    write(
        &content,
        "articles/a.mdx",
        &article("a", "2024-01-10", "news", "tags: [council]\n", &"word ".repeat(401)),
    );
    write(
        &content,
        "articles/b.mdx",
        &article("b", "2024-01-05", "news", "", "Short piece."),
    );
    write(
        &content,
        "articles/2024/02/c.mdx",
        &article(
            "c",
            "2024-02-01",
            "sports",
            "sport: football\nhomeTeam: Eagles\nawayTeam: Hawks\nhomeScore: 21\nawayScore: 14\n",
            "Eagles win.",
        )
        .replace("jane-doe", "sam-lee"),
    );
    write(
        &content,
        "articles/d.mdx",
        &article("d", "2024-03-01", "news", "", "Unfinished").replace("status: published", "status: draft"),
    );
    // Non-document files are not content
    write(&content, "articles/photo.txt", "not a document");

    dir
}

fn load(dir: &TempDir) -> Result<gazette_core::ContentStore, LoadError> {
    ContentLoader::new(Config::for_content_dir(dir.path().join("content"))).load()
}

#[test]
fn test_loads_all_collections() {
    let dir = scenario_site();
    let store = load(&dir).unwrap();

    assert_eq!(store.articles.len(), 4);
    assert_eq!(store.authors.len(), 2);
    assert_eq!(store.categories.len(), 2);
    assert_eq!(store.warnings().count(), 0);

    let jane = store.author("jane-doe").unwrap();
    assert_eq!(jane.twitter.as_deref(), Some("janedoe"));
    assert_eq!(
        store.category("sports").unwrap().description.as_deref(),
        Some("Scores and stories")
    );
}

#[test]
fn test_computed_fields() {
    let dir = scenario_site();
    let store = load(&dir).unwrap();

    for article in &store.articles {
        assert_eq!(article.url, format!("/articles/{}", article.slug));
        assert!(article.word_count >= 1);
        assert_eq!(article.estimated_read_time, article.word_count.div_ceil(200));
    }

    let a = store.article("a").unwrap();
    assert_eq!(a.word_count, 401);
    assert_eq!(a.estimated_read_time, 3);

    let c = store.article("c").unwrap();
    assert_eq!(c.source_path.as_deref(), Some("articles/2024/02/c.mdx"));
    assert_eq!(c.scoreline.home_team.as_deref(), Some("Eagles"));
    assert_eq!(c.scoreline.home_score, Some(21.0));
}

#[test]
fn test_scenario_queries() {
    let dir = scenario_site();
    let store = load(&dir).unwrap();

    let published = query::list_published(&store.articles);
    let slugs: Vec<&str> = published.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["c", "a", "b"]);
    assert!(published.iter().all(|a| a.status == Status::Published));

    let groups = query::group_by_month(&published);
    let summary: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|g| {
            (
                g.label.as_str(),
                g.articles.iter().map(|a| a.slug.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![("February 2024", vec!["c"]), ("January 2024", vec!["a", "b"])]
    );

    // C shares no category, author or tag with A; D is a draft
    let a = store.article("a").unwrap();
    let related = query::related_articles(a, &store.articles, query::RELATED_LIMIT);
    let related: Vec<&str> = related.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(related, vec!["b"]);

    let neighbors = query::neighbors(&published, "a");
    assert_eq!(neighbors.previous.map(|x| x.slug.as_str()), Some("b"));
    assert_eq!(neighbors.next.map(|x| x.slug.as_str()), Some("c"));

    assert!(query::find_by_slug(&store.articles, "nonexistent-slug").is_none());
    assert_eq!(query::find_by_author(&store.articles, "jane-doe").len(), 2);
    assert_eq!(query::find_by_author(&store.articles, "sam-lee").len(), 1);
    assert_eq!(query::find_by_category(&store.articles, "news").len(), 2);
    assert_eq!(query::find_by_tag(&store.articles, "council").len(), 1);
    assert!(query::find_by_tag(&store.articles, "Council").is_empty());
}

#[test]
fn test_missing_title_fails_entire_load() {
    let dir = scenario_site();
    write(
        &dir.path().join("content"),
        "articles/untitled.mdx",
        "---\nslug: untitled\ndate: 2024-01-01\ncategory: news\nauthors: [jane-doe]\n---\nBody\n",
    );

    match load(&dir) {
        Err(LoadError::Schema { path, source }) => {
            assert_eq!(path, "articles/untitled.mdx");
            assert_eq!(source.to_string(), "Missing required field: title");
        }
        other => panic!("Expected schema error, got {:?}", other.map(|s| s.articles.len())),
    }
}

#[test]
fn test_malformed_date_fails_load() {
    let dir = scenario_site();
    write(
        &dir.path().join("content"),
        "articles/bad-date.mdx",
        &article("bad-date", "January 5th", "news", "", "Body"),
    );

    let err = load(&dir).unwrap_err();
    assert!(err.to_string().contains("malformed date"));
}

#[test]
fn test_stray_document_fails_load() {
    let dir = scenario_site();
    write(&dir.path().join("content"), "README.md", "# Content\n");

    assert!(matches!(
        load(&dir),
        Err(LoadError::UnknownDocumentType { ref path }) if path == "README.md"
    ));
}

#[test]
fn test_config_file_and_ignore_patterns() {
    let dir = scenario_site();
    write(&dir.path().join("content"), "README.md", "# Content\n");
    write(
        dir.path(),
        "gazette.yml",
        "site:\n  title: The Citizen\n  url: https://thecitizen.example\npaths:\n  content: content\n  output: dist\nwords_per_minute: 100\nignore_patterns:\n  - '^README\\.md$'\n",
    );

    let config = Config::from_file(dir.path().join("gazette.yml")).unwrap();
    let store = ContentLoader::new(config).load().unwrap();

    let a = store.article("a").unwrap();
    assert_eq!(a.estimated_read_time, 5);
}

#[test]
fn test_unresolved_author_is_soft() {
    let dir = scenario_site();
    write(
        &dir.path().join("content"),
        "articles/guest.mdx",
        &article("guest", "2024-01-20", "news", "", "Guest column").replace("jane-doe", "guest-writer"),
    );

    let store = load(&dir).unwrap();
    let guest = store.article("guest").unwrap();
    assert_eq!(query::author_name(&store.authors, &guest.authors[0]), "guest-writer");
    assert!(store.warnings().any(|d| d.code == "author.unresolved"));
}
