//! Opening a DOI on the mirror search site.

use std::fmt;
use std::sync::Mutex;

/// Default mirror search site
pub const DEFAULT_MIRROR_BASE: &str = "https://sci-hub.red";

/// Build the mirror search URL for a DOI
pub fn mirror_url(base: &str, doi: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), doi)
}

/// Something that can hand a URL to a web browser.
///
/// Launching is fire-and-forget: implementations report nothing back.
pub trait BrowserLauncher: Send + Sync + fmt::Debug {
    fn launch(&self, url: &str);
}

/// Opens URLs with the operating system's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn launch(&self, url: &str) {
        match open::that_detached(url) {
            Ok(()) => tracing::debug!(url, "Handed URL to the default browser"),
            Err(e) => tracing::warn!(url, error = %e, "Failed to launch browser"),
        }
    }
}

/// A launcher that only remembers the URLs it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs launched so far, oldest first
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl BrowserLauncher for RecordingBrowser {
    fn launch(&self, url: &str) {
        if let Ok(mut guard) = self.opened.lock() {
            guard.push(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_url() {
        assert_eq!(
            mirror_url(DEFAULT_MIRROR_BASE, "10.1000/xyz123"),
            "https://sci-hub.red/10.1000/xyz123"
        );
        assert_eq!(
            mirror_url("https://mirror.example.org/", "10.1/a"),
            "https://mirror.example.org/10.1/a"
        );
    }

    #[test]
    fn test_recording_browser() {
        let browser = RecordingBrowser::new();
        browser.launch("https://sci-hub.red/10.1/a");
        browser.launch("https://sci-hub.red/10.1/b");
        assert_eq!(
            browser.opened(),
            vec!["https://sci-hub.red/10.1/a", "https://sci-hub.red/10.1/b"]
        );
    }
}
