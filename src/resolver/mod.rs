//! DOI metadata resolution.
//!
//! The [`MetadataResolver`] trait is the seam between the citation form and
//! the network. [`DoiResolver`] talks to `doi.org` using CSL-JSON content
//! negotiation; [`MockResolver`] answers from memory for tests and demos.

mod doi;
mod mock;

pub use doi::{DoiResolver, CSL_JSON};
pub use mock::MockResolver;

use async_trait::async_trait;

use crate::models::ArticleMetadata;

/// Resolves a DOI to the metadata needed for a citation
#[async_trait]
pub trait MetadataResolver: Send + Sync + std::fmt::Debug {
    /// Look up a single DOI.
    ///
    /// Implementations must not retry and must not cache results.
    async fn resolve(&self, doi: &str) -> Result<ArticleMetadata, LookupError>;
}

/// Errors that can occur during a DOI lookup
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The DOI was blank
    #[error("DOI is empty")]
    EmptyDoi,

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The resolver answered with a non-success status
    #[error("Resolver returned status {0}")]
    Status(u16),

    /// The response body was not usable CSL-JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// The background lookup task did not complete
    #[error("Lookup task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Network(err.to_string())
    }
}
