//! CLI command implementations.

pub mod article;
pub mod build;
pub mod list;
pub mod verify;

pub use article::show_article;
pub use build::build_site;
pub use list::{list_articles, search_articles, show_archive, ListFilter};
pub use verify::verify_site;
