//! The citation form controller.
//!
//! [`CitationForm`] exposes one method per user action. It owns the session
//! state (citation store, selected format, theme) and talks to the resolver
//! and the browser launcher, but never touches the terminal: the
//! presentation layer in [`crate::ui`] passes plain data in and renders the
//! results or errors that come back.

mod store;

pub use store::CitationStore;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::models::{CitationFormat, Theme};
use crate::resolver::{DoiResolver, LookupError, MetadataResolver};
use crate::utils::{
    format_citation, mirror_url, with_default_extension, write_citations, BrowserLauncher,
    ExportError, SystemBrowser,
};

/// A required field was left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("DOI field is empty")]
    EmptyDoi,

    #[error("Mirror search DOI field is empty")]
    EmptyMirrorDoi,
}

/// Errors returned by form commands.
///
/// None of these are fatal: the form reports them and keeps running.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The citations were written to `path`
    Written { path: PathBuf, count: usize },
    /// No destination was chosen
    Cancelled,
}

/// Session state and commands of the citation form
#[derive(Debug)]
pub struct CitationForm {
    resolver: Arc<dyn MetadataResolver>,
    browser: Arc<dyn BrowserLauncher>,
    store: CitationStore,
    format: CitationFormat,
    theme: Theme,
    mirror_base: String,
    default_extension: String,
}

impl CitationForm {
    pub fn new(
        resolver: Arc<dyn MetadataResolver>,
        browser: Arc<dyn BrowserLauncher>,
        config: &Config,
    ) -> Self {
        Self {
            resolver,
            browser,
            store: CitationStore::new(),
            format: CitationFormat::default(),
            theme: Theme::default(),
            mirror_base: config.mirror.base_url.clone(),
            default_extension: config.export.default_extension.clone(),
        }
    }

    /// Build a form that resolves against doi.org and opens the system browser
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let resolver = DoiResolver::new(&config.resolver)?;
        Ok(Self::new(
            Arc::new(resolver),
            Arc::new(SystemBrowser),
            config,
        ))
    }

    /// Look up `doi`, format it in the selected format and append it to the session.
    ///
    /// The lookup runs as a separate task; the citation is appended only once it
    /// has completed, so citations keep the order in which they were requested.
    pub async fn generate(&mut self, doi: &str) -> Result<String, CommandError> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(ValidationError::EmptyDoi.into());
        }

        let resolver = Arc::clone(&self.resolver);
        let requested = doi.to_string();
        let metadata = tokio::spawn(async move { resolver.resolve(&requested).await })
            .await
            .map_err(|e| LookupError::Task(e.to_string()))??;

        let citation = format_citation(&metadata, self.format);
        let count = self.store.append(citation.clone());
        tracing::info!(doi, format = %self.format, count, "Citation generated");

        Ok(citation)
    }

    /// Export every citation to the path returned by `choose_path`.
    ///
    /// An empty session is rejected before a path is asked for. When
    /// `choose_path` returns `None` the export is cancelled without touching
    /// the file system.
    pub fn export_with<F>(&self, choose_path: F) -> Result<ExportOutcome, CommandError>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        if self.store.is_empty() {
            return Err(ExportError::Empty.into());
        }

        let Some(path) = choose_path() else {
            tracing::debug!("Export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        let path = with_default_extension(path, &self.default_extension);
        let count = write_citations(&path, self.store.snapshot())?;
        Ok(ExportOutcome::Written { path, count })
    }

    /// Open the mirror search for `doi` in the browser, returning the URL opened
    pub fn search_mirror(&self, doi: &str) -> Result<String, CommandError> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(ValidationError::EmptyMirrorDoi.into());
        }

        let url = mirror_url(&self.mirror_base, doi);
        tracing::info!(%url, "Opening mirror search");
        self.browser.launch(&url);
        Ok(url)
    }

    /// Switch between the light and dark background, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        tracing::debug!(background = %self.theme.background_hex(), "Theme changed");
        self.theme
    }

    pub fn select_format(&mut self, format: CitationFormat) {
        self.format = format;
    }

    pub fn format(&self) -> CitationFormat {
        self.format
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Citations generated so far, in generation order
    pub fn citations(&self) -> &[String] {
        self.store.snapshot()
    }

    pub fn store(&self) -> &CitationStore {
        &self.store
    }
}
