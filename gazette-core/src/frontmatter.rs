//! Frontmatter parsing from content files.

use serde_yaml::{Mapping, Value};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Frontmatter must be a mapping of fields, found {0}")]
    NotAMapping(&'static str),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^\u{feff}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?$").unwrap()
    })
}

/// Parse frontmatter from a content file
///
/// Returns a tuple of (raw fields, body).
/// If no frontmatter is present, returns an empty mapping with the full content
/// as body; schema validation then reports whatever required fields are missing.
///
/// # Example
///
/// ```
/// use gazette_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: Budget vote\ndate: 2024-01-10\n---\nCouncil met on Tuesday.\n";
///
/// let (fields, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fields.get("title").and_then(|v| v.as_str()), Some("Budget vote"));
/// assert!(body.starts_with("Council met"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Mapping, String), FrontmatterError> {
    let re = frontmatter_regex();

    let Some(captures) = re.captures(content) else {
        return Ok((Mapping::new(), content.to_string()));
    };

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let fields = match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => map,
        // An empty frontmatter block deserializes to null
        Value::Null => Mapping::new(),
        other => return Err(FrontmatterError::NotAMapping(value_kind(&other))),
    };

    Ok((fields, body.to_string()))
}

/// Human-readable name of a YAML value's kind, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
