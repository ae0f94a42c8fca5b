//! Utility modules supporting the citation form.
//!
//! - [`format_citation`]: Render article metadata as an APA or Vancouver citation
//! - [`HttpClient`]: Shared HTTP client configured from the resolver settings
//! - [`write_citations`]: Atomically write citations to a text file
//! - [`mirror_url`] / [`BrowserLauncher`]: Open a DOI on the mirror search site
//!
//! # Formatting
//!
//! ```rust
//! use doi_cite::models::{ArticleMetadata, CitationFormat};
//! use doi_cite::utils::format_citation;
//!
//! let metadata = ArticleMetadata::new(
//!     "Example Paper",
//!     "Smith",
//!     2020,
//!     "https://doi.org/10.1000/xyz123",
//! );
//! assert_eq!(
//!     format_citation(&metadata, CitationFormat::Apa),
//!     "Smith (2020). Example Paper. Recuperado de https://doi.org/10.1000/xyz123"
//! );
//! ```

mod cite;
mod export;
mod http;
mod mirror;

pub use cite::format_citation;
pub use export::{render, with_default_extension, write_citations, ExportError, PARAGRAPH_BREAK};
pub use http::HttpClient;
pub use mirror::{mirror_url, BrowserLauncher, RecordingBrowser, SystemBrowser, DEFAULT_MIRROR_BASE};
