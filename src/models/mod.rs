//! Core data models for article metadata and form state.

mod article;
mod form;

pub use article::{ArticleMetadata, PublicationDate, DOI_ORG, UNKNOWN_DATE, UNKNOWN_TITLE};
pub use form::{CitationFormat, Theme, UnknownFormat};
