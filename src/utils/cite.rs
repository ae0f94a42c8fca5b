//! Citation formatting.
//!
//! Supports the APA and Vancouver templates. Fields are substituted
//! verbatim, without escaping or reordering of author names.

use crate::models::{ArticleMetadata, CitationFormat};

/// Format an article citation in the specified format
pub fn format_citation(metadata: &ArticleMetadata, format: CitationFormat) -> String {
    match format {
        CitationFormat::Apa => format_apa(metadata),
        CitationFormat::Vancouver => format_vancouver(metadata),
    }
}

/// Format: Author (Year). Title. Recuperado de URL
fn format_apa(metadata: &ArticleMetadata) -> String {
    format!(
        "{} ({}). {}. Recuperado de {}",
        metadata.author, metadata.date, metadata.title, metadata.url
    )
}

/// Format: Author. Title. Year; Disponible en: URL
fn format_vancouver(metadata: &ArticleMetadata) -> String {
    format!(
        "{}. {}. {}; Disponible en: {}",
        metadata.author, metadata.title, metadata.date, metadata.url
    )
}
