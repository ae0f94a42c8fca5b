//! doi.org resolver using CSL-JSON content negotiation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ResolverConfig;
use crate::models::{ArticleMetadata, PublicationDate, UNKNOWN_TITLE};
use crate::resolver::{LookupError, MetadataResolver};
use crate::utils::HttpClient;

/// Media type requested from the resolver
pub const CSL_JSON: &str = "application/vnd.citationstyles.csl+json";

/// Resolves DOIs through doi.org (or a compatible endpoint)
#[derive(Debug, Clone)]
pub struct DoiResolver {
    client: HttpClient,
    base_url: String,
}

impl DoiResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: HttpClient::from_config(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL requested for a DOI; the DOI is inserted verbatim
    pub fn lookup_url(&self, doi: &str) -> String {
        format!("{}/{}", self.base_url, doi)
    }
}

#[async_trait]
impl MetadataResolver for DoiResolver {
    async fn resolve(&self, doi: &str) -> Result<ArticleMetadata, LookupError> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(LookupError::EmptyDoi);
        }

        let url = self.lookup_url(doi);
        tracing::debug!(%url, "Resolving DOI");

        let response = self
            .client
            .client()
            .get(&url)
            .header(ACCEPT, CSL_JSON)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(doi, error = %e, "DOI lookup failed");
                LookupError::Network(format!("Failed to fetch DOI: {}", e))
            })?;

        // Only a plain 200 carries a complete CSL-JSON record
        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(doi, status = status.as_u16(), "Resolver returned an error status");
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(format!("Failed to read response: {}", e)))?;

        let item: CslItem = serde_json::from_str(&body)
            .map_err(|e| LookupError::Parse(format!("Failed to parse CSL-JSON: {}", e)))?;

        Ok(item.into_metadata(doi))
    }
}

/// The subset of a CSL-JSON item used for citations
#[derive(Debug, Default, Deserialize)]
struct CslItem {
    #[serde(default)]
    title: Option<Value>,

    #[serde(default)]
    author: Option<Vec<CslName>>,

    #[serde(default)]
    issued: Option<CslDate>,
}

#[derive(Debug, Deserialize)]
struct CslName {
    #[serde(default)]
    family: Option<String>,

    /// Institutional authors carry a single literal name
    #[serde(default)]
    literal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CslDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Option<Vec<Vec<Value>>>,
}

impl CslItem {
    fn into_metadata(self, doi: &str) -> ArticleMetadata {
        ArticleMetadata {
            title: self.title(),
            author: self.authors(),
            date: self.year(),
            url: ArticleMetadata::canonical_url(doi),
        }
    }

    fn title(&self) -> String {
        match &self.title {
            Some(Value::String(title)) => title.clone(),
            // Some registries send titles as a list
            Some(Value::Array(titles)) => titles
                .iter()
                .find_map(Value::as_str)
                .unwrap_or(UNKNOWN_TITLE)
                .to_string(),
            _ => UNKNOWN_TITLE.to_string(),
        }
    }

    fn authors(&self) -> String {
        self.author
            .iter()
            .flatten()
            .filter_map(|name| name.family.as_deref().or(name.literal.as_deref()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn year(&self) -> PublicationDate {
        let first = self
            .issued
            .as_ref()
            .and_then(|issued| issued.date_parts.as_ref())
            .and_then(|parts| parts.first())
            .and_then(|part| part.first());

        match first {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(year) => PublicationDate::Year(year),
                None => PublicationDate::Text(n.to_string()),
            },
            Some(Value::String(text)) => match text.trim().parse::<i64>() {
                Ok(year) => PublicationDate::Year(year),
                Err(_) => PublicationDate::Text(text.clone()),
            },
            _ => PublicationDate::unknown(),
        }
    }
}
