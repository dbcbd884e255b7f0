//! Listing sources: where seed data comes from.
//!
//! The seed routine only needs one page of `{name, url}` entries, so the
//! source is a one-method trait. [`PokeApiSource`] reads the public PokeAPI
//! listing endpoint; tests plug in an in-memory source.

use std::time::Duration;

use serde::Deserialize;

// ── Error ───────────────────────────────────────────────────────────

/// Failure while reading the listing endpoint.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

// ── Listing types ───────────────────────────────────────────────────

/// One entry of the listing. `url` ends in `/{code}/`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
}

/// One page of the listing. Fields other than `results` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub results: Vec<ListingEntry>,
}

// ── ListingSource ───────────────────────────────────────────────────

/// A paged listing of species. Only the first page is ever requested.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync + 'static {
    /// Fetch up to `limit` entries from the start of the listing.
    async fn fetch_page(&self, limit: usize) -> Result<Vec<ListingEntry>, SourceError>;
}

/// PokeAPI-compatible listing endpoint (`GET {base_url}?limit=N`).
pub struct PokeApiSource {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn page_url(&self, limit: usize) -> String {
        format!("{}?limit={}", self.base_url, limit)
    }
}

#[async_trait::async_trait]
impl ListingSource for PokeApiSource {
    async fn fetch_page(&self, limit: usize) -> Result<Vec<ListingEntry>, SourceError> {
        let resp = self.http.get(self.page_url(limit)).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceError::Server { status, message });
        }

        let page: ListingPage = resp
            .json()
            .await
            .map_err(|e| SourceError::Decode(format!("listing page: {}", e)))?;
        Ok(page.results)
    }
}
