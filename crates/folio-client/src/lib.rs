//! folio-client - Paginated HTTP client for the corpus API.
//!
//! One endpoint per record type returns `{records: [...], meta:
//! {has_next_page}}`; pages are requested via a `page` query parameter
//! starting at 1 and walked strictly in order. Any transport failure or
//! malformed response is fatal; there are no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use folio_core::{
    defaults, Agent, Holding, Image, ImageDetail, ImageDetailSource, Language, Motif, Person,
    RecordSource, Result, Series,
};

/// Pagination envelope returned by every collection endpoint.
#[derive(Debug, Deserialize)]
struct Page<T> {
    records: Vec<T>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    has_next_page: bool,
}

/// HTTP client for the corpus REST API.
pub struct CorpusClient {
    client: Client,
    base_url: String,
}

impl CorpusClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, defaults::FETCH_TIMEOUT_SECS)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create from environment variables (with defaults).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FOLIO_API_BASE` | compiled-in corpus URL |
    /// | `FOLIO_FETCH_TIMEOUT_SECS` | 60 |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FOLIO_API_BASE").unwrap_or_else(|_| defaults::API_BASE.to_string());
        let timeout_secs = std::env::var("FOLIO_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::FETCH_TIMEOUT_SECS);

        Self::with_timeout(base_url, timeout_secs)
    }

    /// Fetch every record of one type, accumulating page by page until the
    /// server reports no further page.
    async fn fetch_paged<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut page = 1u32;
        loop {
            let url = format!("{}/{}?page={}", self.base_url, kind, page);
            debug!(kind, page, "fetching page");
            let body: Page<T> = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            records.extend(body.records);
            if !body.meta.has_next_page {
                break;
            }
            page += 1;
        }
        info!(kind, count = records.len(), pages = page, "fetched records");
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for CorpusClient {
    async fn series(&self) -> Result<Vec<Series>> {
        self.fetch_paged("Series").await
    }

    async fn agents(&self) -> Result<Vec<Agent>> {
        self.fetch_paged("Agent").await
    }

    async fn people(&self) -> Result<Vec<Person>> {
        self.fetch_paged("Person").await
    }

    async fn holdings(&self) -> Result<Vec<Holding>> {
        self.fetch_paged("Holding").await
    }

    async fn languages(&self) -> Result<Vec<Language>> {
        self.fetch_paged("Language").await
    }

    async fn images(&self) -> Result<Vec<Image>> {
        self.fetch_paged("Image").await
    }

    async fn motifs(&self) -> Result<Vec<Motif>> {
        self.fetch_paged("Motif").await
    }
}

#[async_trait]
impl ImageDetailSource for CorpusClient {
    async fn image_detail(&self, id: &str) -> Result<ImageDetail> {
        let url = format!("{}/Image/{}", self.base_url, id);
        debug!(id, "fetching image detail");
        let detail = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(detail)
    }
}
