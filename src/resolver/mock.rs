//! In-memory resolver for tests and offline demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::ArticleMetadata;
use crate::resolver::{LookupError, MetadataResolver};

/// A resolver that answers from a fixed table of DOIs.
///
/// Unknown DOIs fail the same way a 404 from doi.org would.
#[derive(Debug, Default)]
pub struct MockResolver {
    articles: Mutex<HashMap<String, ArticleMetadata>>,
    calls: Mutex<Vec<String>>,
}

impl MockResolver {
    /// Create a new mock resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the metadata returned for `doi`.
    pub fn with_article(self, doi: &str, metadata: ArticleMetadata) -> Self {
        self.insert(doi, metadata);
        self
    }

    pub fn insert(&self, doi: &str, metadata: ArticleMetadata) {
        if let Ok(mut guard) = self.articles.lock() {
            guard.insert(doi.to_string(), metadata);
        }
    }

    /// DOIs looked up so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MetadataResolver for MockResolver {
    async fn resolve(&self, doi: &str) -> Result<ArticleMetadata, LookupError> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(LookupError::EmptyDoi);
        }

        if let Ok(mut guard) = self.calls.lock() {
            guard.push(doi.to_string());
        }

        let guard = self
            .articles
            .lock()
            .map_err(|e| LookupError::Task(e.to_string()))?;
        guard.get(doi).cloned().ok_or(LookupError::Status(404))
    }
}
