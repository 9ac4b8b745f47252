//! Thin HTTP client over the BoardGameGeek XML API v2.

use std::time::Duration;

use url::Url;

use shelf_types::ShelfError;

use crate::xml::{self, BggHotItem, BggSearchItem, BggThing};

/// Connector name used in errors and as the canonical source tag.
pub(crate) const NAME: &str = "shelf-bgg";

/// Interim bodies are plain text/HTML, never XML; the phrase is matched as a
/// substring before any parsing is attempted.
const INTERIM_MARKER: &str = "has been accepted";

/// The thing endpoint accepts comma-separated id batches; keep requests at a
/// sane size regardless of what callers pass in.
const MAX_IDS_PER_REQUEST: usize = 20;

/// Construction-time settings for [`BggClient`].
#[derive(Debug, Clone)]
pub struct BggConfig {
    /// API base, e.g. `https://boardgamegeek.com/xmlapi2`.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Backoff before the single retry after an interim "accepted" response.
    pub retry_backoff: Duration,
}

impl Default for BggConfig {
    fn default() -> Self {
        Self {
            base_url: "https://boardgamegeek.com/xmlapi2".to_string(),
            timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_secs(2),
        }
    }
}

/// HTTP client for the search, thing, and hot endpoints.
pub struct BggClient {
    http: reqwest::Client,
    base: Url,
    retry_backoff: Duration,
}

impl BggClient {
    /// Build a client with the given configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparseable base URL and `Other` if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &BggConfig) -> Result<Self, ShelfError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ShelfError::InvalidArg(format!("bad base url: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShelfError::Other(e.to_string()))?;
        Ok(Self {
            http,
            base,
            retry_backoff: config.retry_backoff,
        })
    }

    fn endpoint(&self, segment: &str) -> Result<Url, ShelfError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ShelfError::InvalidArg("base url cannot be a base".into()))?
            .push(segment);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String, ShelfError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ShelfError::connector(NAME, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ShelfError::connector(NAME, format!("HTTP {status}")));
        }
        resp.text()
            .await
            .map_err(|e| ShelfError::connector(NAME, e.to_string()))
    }

    /// Search things by title.
    pub async fn search(&self, query: &str, exact: bool) -> Result<Vec<BggSearchItem>, ShelfError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("type", "boardgame");
        if exact {
            url.query_pairs_mut().append_pair("exact", "1");
        }
        let body = self.get_text(url).await?;
        xml::parse_search(&body)
    }

    /// Fetch full records (with statistics) for a batch of ids.
    ///
    /// Batches larger than the per-request bound are chunked transparently.
    /// An interim "request accepted, still processing" body triggers one
    /// retry after a fixed backoff; if the provider is still processing after
    /// that, the chunk resolves to an empty set rather than an error.
    pub async fn things(&self, ids: &[String]) -> Result<Vec<BggThing>, ShelfError> {
        let mut out = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            out.extend(self.things_chunk(chunk).await?);
        }
        Ok(out)
    }

    async fn things_chunk(&self, ids: &[String]) -> Result<Vec<BggThing>, ShelfError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint("thing")?;
        url.query_pairs_mut()
            .append_pair("id", &ids.join(","))
            .append_pair("type", "boardgame")
            .append_pair("stats", "1");

        let body = self.get_text(url.clone()).await?;
        if !body.contains(INTERIM_MARKER) {
            return xml::parse_things(&body);
        }

        // Soft-fail path: the provider queued the request. Wait once, retry
        // once, and give up with an empty result set so one slow batch never
        // takes down a whole screen.
        #[cfg(feature = "tracing")]
        tracing::warn!(backoff_ms = %self.retry_backoff.as_millis(), "interim response, retrying once");
        tokio::time::sleep(self.retry_backoff).await;

        let body = self.get_text(url).await?;
        if body.contains(INTERIM_MARKER) {
            #[cfg(feature = "tracing")]
            tracing::warn!("still processing after retry, returning empty batch");
            return Ok(Vec::new());
        }
        xml::parse_things(&body)
    }

    /// Fetch the hot list, rank-ascending.
    pub async fn hot(&self) -> Result<Vec<BggHotItem>, ShelfError> {
        let mut url = self.endpoint("hot")?;
        url.query_pairs_mut().append_pair("type", "boardgame");
        let body = self.get_text(url).await?;
        xml::parse_hot(&body)
    }
}
