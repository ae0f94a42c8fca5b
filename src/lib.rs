//! # doi-cite
//!
//! An interactive form that resolves DOIs to bibliographic metadata and
//! collects APA or Vancouver citations for the current session.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (ArticleMetadata, CitationFormat, Theme)
//! - [`resolver`]: DOI metadata resolution behind the [`MetadataResolver`] trait
//! - [`app`]: The form controller and the session citation store
//! - [`ui`]: Terminal presentation and the form event loop
//! - [`utils`]: Citation formatting, export, mirror search and HTTP client
//! - [`config`]: Configuration management

pub mod app;
pub mod config;
pub mod models;
pub mod resolver;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::{CitationForm, CommandError};
pub use models::{ArticleMetadata, CitationFormat};
pub use resolver::{DoiResolver, MetadataResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
