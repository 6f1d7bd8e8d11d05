//! Verify content health and emit diagnostics.

use crate::output::print_json;
use crate::site::load_site;
use anyhow::Result;
use gazette_core::{Diagnostic, DiagnosticSeverity};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct VerificationSummary<'a> {
    articles: usize,
    published: usize,
    authors: usize,
    categories: usize,
    warnings: usize,
    infos: usize,
    diagnostics: &'a [Diagnostic],
}

/// Load every document without writing output and surface diagnostics.
///
/// Invalid documents fail the load and therefore the command.
pub fn verify_site(config_path: &Path, json: bool) -> Result<()> {
    let (_config, store) = load_site(config_path)?;

    let count = |severity| {
        store
            .diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    };

    let summary = VerificationSummary {
        articles: store.articles.len(),
        published: store.articles.iter().filter(|a| a.is_published()).count(),
        authors: store.authors.len(),
        categories: store.categories.len(),
        warnings: count(DiagnosticSeverity::Warning),
        infos: count(DiagnosticSeverity::Info),
        diagnostics: &store.diagnostics,
    };

    if json {
        return print_json("site.verify", summary);
    }

    println!(
        "Verification complete: {} articles ({} published), {} authors, {} categories, {} warnings, {} info",
        summary.articles,
        summary.published,
        summary.authors,
        summary.categories,
        summary.warnings,
        summary.infos
    );
    for diag in &store.diagnostics {
        let source = diag
            .source_path
            .as_deref()
            .map(|s| format!(" ({})", s))
            .unwrap_or_default();
        println!(
            "- {:?} {}{}: {}",
            diag.severity, diag.code, source, diag.message
        );
    }

    Ok(())
}
