//! Configuration parsing and management.

use crate::derive::WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the gazette.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: usize,

    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_words_per_minute() -> usize {
    WORDS_PER_MINUTE
}

fn default_related_limit() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content_dir")]
    pub content: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Configuration with defaults for loading a content directory directly
    pub fn for_content_dir<P: Into<PathBuf>>(content: P) -> Self {
        Self {
            site: SiteConfig {
                title: String::new(),
                url: String::new(),
                description: None,
            },
            paths: PathsConfig {
                content: content.into(),
                output: default_output_dir(),
            },
            base_url: default_base_url(),
            words_per_minute: default_words_per_minute(),
            related_limit: default_related_limit(),
            ignore_patterns: Vec::new(),
            config_path: None,
        }
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_yaml() {
        let config: Config = serde_yaml::from_str(
            r#"
site:
  title: "The Citizen"
  url: "https://thecitizen.example"
paths: {}
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "/");
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.related_limit, 3);
        assert_eq!(config.content_dir(), PathBuf::from("content"));
        assert_eq!(config.output_dir(), PathBuf::from("dist"));
        assert!(config.site.description.is_none());
    }

    #[test]
    fn test_paths_resolve_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gazette.yml");
        std::fs::write(
            &path,
            "site:\n  title: T\n  url: https://example.com\npaths:\n  content: posts\n  output: /tmp/out\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.content_dir(), dir.path().join("posts"));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::from_file("/definitely/not/here/gazette.yml"),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("/"), "/");
        assert_eq!(normalize_base_url("news"), "/news/");
        assert_eq!(normalize_base_url("/news//local/"), "/news/local/");
    }
}
