//! Slug normalization and tag URLs.

use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: OnceLock<Regex> = OnceLock::new();

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace and underscores with hyphens
/// - Remove special characters (except hyphens)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use gazette_core::slugify;
///
/// assert_eq!(slugify("Local News"), "local-news");
/// assert_eq!(slugify("Arts & Culture"), "arts-culture");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() || c == '_' {
                Some("-")
            } else if c.is_alphanumeric() || c == '-' {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let re = HYPHEN_RUNS.get_or_init(|| Regex::new(r"-+").unwrap());
    re.replace_all(&cleaned, "-").trim_matches('-').to_string()
}

/// Whether a slug is already in canonical form
pub fn is_canonical_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}

/// URL path of a tag page
///
/// Tags are free-form, so they are percent-encoded rather than slugified.
pub fn tag_url(tag: &str) -> String {
    format!("/tags/{}", urlencoding::encode(tag))
}
