//! Article metadata model produced by a DOI lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical DOI resolver used in every citation link
pub const DOI_ORG: &str = "https://doi.org";

/// Placeholder used when the resolver returns no title
pub const UNKNOWN_TITLE: &str = "Título Desconocido";

/// Placeholder used when the resolver returns no issued date
pub const UNKNOWN_DATE: &str = "Fecha Desconocida";

/// Publication date as found in the first `date-parts` component.
///
/// Resolvers normally return an integer year, but some records carry
/// free text (or nothing at all, in which case the placeholder is used).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicationDate {
    Year(i64),
    Text(String),
}

impl PublicationDate {
    /// The placeholder date for records without an issued date
    pub fn unknown() -> Self {
        PublicationDate::Text(UNKNOWN_DATE.to_string())
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationDate::Year(year) => write!(f, "{}", year),
            PublicationDate::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for PublicationDate {
    fn from(year: i64) -> Self {
        PublicationDate::Year(year)
    }
}

impl From<i32> for PublicationDate {
    fn from(year: i32) -> Self {
        PublicationDate::Year(i64::from(year))
    }
}

/// Bibliographic fields needed to render a citation.
///
/// A record lives only long enough to be formatted; it is never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    /// Article title
    pub title: String,

    /// Family names joined with ", " (empty when the record has no authors)
    pub author: String,

    /// Publication year
    pub date: PublicationDate,

    /// Canonical resolver URL for the DOI
    pub url: String,
}

impl ArticleMetadata {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<PublicationDate>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            date: date.into(),
            url: url.into(),
        }
    }

    /// Canonical `https://doi.org/<doi>` link for a DOI
    pub fn canonical_url(doi: &str) -> String {
        format!("{}/{}", DOI_ORG, doi)
    }
}
