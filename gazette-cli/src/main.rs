//! # gazette CLI
//!
//! Command-line interface for the gazette news site content core.

mod commands;
mod output;
mod site;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gazette")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "gazette.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all content and write JSON data files and the sitemap
    Build,

    /// Load all content and report diagnostics
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List published articles, newest first
    List {
        /// Only articles credited to this author slug
        #[arg(long)]
        author: Option<String>,

        /// Only articles in this category slug
        #[arg(long)]
        category: Option<String>,

        /// Only articles carrying this tag (case-sensitive)
        #[arg(long)]
        tag: Option<String>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Published articles grouped by month
    Archive {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one article with its byline, neighbors and related articles
    Article {
        /// Article slug
        slug: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Search published articles by title, dek or category
    Search {
        /// Search query
        query: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build => commands::build_site(&cli.config),
        Commands::Verify { json } => commands::verify_site(&cli.config, json),
        Commands::List {
            author,
            category,
            tag,
            json,
        } => {
            let filter = commands::ListFilter {
                author,
                category,
                tag,
            };
            commands::list_articles(&cli.config, &filter, json)
        }
        Commands::Archive { json } => commands::show_archive(&cli.config, json),
        Commands::Article { slug, json } => commands::show_article(&cli.config, &slug, json),
        Commands::Search { query, json } => commands::search_articles(&cli.config, &query, json),
    }
}
