//! Session citation store.

/// Citations generated during this session, in generation order.
///
/// The store only grows; nothing is persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationStore {
    citations: Vec<String>,
}

impl CitationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatted citation, returning the new number of citations
    pub fn append(&mut self, citation: String) -> usize {
        self.citations.push(citation);
        self.citations.len()
    }

    /// All citations in generation order
    pub fn snapshot(&self) -> &[String] {
        &self.citations
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }
}
