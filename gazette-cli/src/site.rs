//! Shared loading step for every command.

use anyhow::{Context, Result};
use gazette_core::{Config, ContentLoader, ContentStore};
use std::path::Path;

/// Load config and the full content store, failing on any invalid document.
pub fn load_site(config_path: &Path) -> Result<(Config, ContentStore)> {
    tracing::debug!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let loader = ContentLoader::new(config.clone());
    let store = loader
        .load()
        .with_context(|| format!("Failed to load content from {:?}", config.content_dir()))?;

    Ok((config, store))
}
