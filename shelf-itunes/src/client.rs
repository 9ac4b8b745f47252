//! Thin HTTP client over the iTunes Search API (keyless, JSON).

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use shelf_types::ShelfError;

pub(crate) const NAME: &str = "shelf-itunes";

/// Construction-time settings for [`ItunesClient`].
#[derive(Debug, Clone)]
pub struct ItunesConfig {
    /// API base, e.g. `https://itunes.apple.com`.
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Default result cap sent to the provider when the request has none.
    pub default_limit: usize,
}

impl Default for ItunesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com".to_string(),
            timeout: Duration::from_secs(10),
            default_limit: 25,
        }
    }
}

/// One album record as the provider reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesAlbum {
    /// Provider collection id.
    pub collection_id: Option<u64>,
    /// Album title.
    pub collection_name: Option<String>,
    /// Primary artist.
    pub artist_name: Option<String>,
    /// 100px artwork URL.
    pub artwork_url100: Option<String>,
    /// Store price.
    pub collection_price: Option<f32>,
    /// ISO currency code for the price.
    pub currency: Option<String>,
    /// Number of tracks.
    pub track_count: Option<u32>,
    /// RFC 3339 release timestamp.
    pub release_date: Option<String>,
    /// Primary genre label.
    pub primary_genre_name: Option<String>,
    /// "explicit" | "cleaned" | "notExplicit".
    pub collection_explicitness: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<ItunesAlbum>,
}

/// HTTP client for the album search endpoint.
pub struct ItunesClient {
    http: reqwest::Client,
    base: Url,
    default_limit: usize,
}

impl ItunesClient {
    /// Build a client with the given configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparseable base URL and `Other` if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ItunesConfig) -> Result<Self, ShelfError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ShelfError::InvalidArg(format!("bad base url: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShelfError::Other(e.to_string()))?;
        Ok(Self {
            http,
            base,
            default_limit: config.default_limit,
        })
    }

    /// Search albums by free text.
    pub async fn search_albums(
        &self,
        term: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ItunesAlbum>, ShelfError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ShelfError::InvalidArg("base url cannot be a base".into()))?
            .push("search");
        url.query_pairs_mut()
            .append_pair("term", term)
            .append_pair("media", "music")
            .append_pair("entity", "album")
            .append_pair("limit", &limit.unwrap_or(self.default_limit).to_string());

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
        let envelope: SearchEnvelope = resp
            .json()
            .await
            .map_err(|e| ShelfError::Data(format!("bad search payload: {e}")))?;
        Ok(envelope.results)
    }
}
