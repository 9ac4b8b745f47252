//! shelf-trailer
//!
//! Trailer-lookup connector. Works without any credentials: when a search
//! API key is configured it is tried first, otherwise (or on failure) a list
//! of open mirror instances is walked, and every mirror winner is verified
//! through the oEmbed endpoint before being returned. A lookup that finds
//! nothing declines with `NotFound` so the orchestrator's fallback chain can
//! move on; it never takes the whole request down.
#![warn(missing_docs)]

/// Candidate scoring heuristics.
pub mod score;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use shelf_core::connector::{ConnectorKey, MediaConnector, TrailerProvider};
use shelf_core::{MediaItem, TrailerHit};
use shelf_types::{MediaKind, ShelfError};

pub use score::{Candidate, score_candidate};

const NAME: &str = "shelf-trailer";

/// Construction-time settings for [`TrailerConnector`].
#[derive(Debug, Clone)]
pub struct TrailerConfig {
    /// Optional search API key; absence degrades to the mirror path, never errors.
    pub api_key: Option<String>,
    /// Keyed search API base.
    pub api_base: String,
    /// Open mirror instances tried in order when the keyed path is
    /// unavailable or empty-handed.
    pub mirrors: Vec<String>,
    /// oEmbed endpoint used to confirm a candidate actually exists.
    pub oembed_base: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for TrailerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://www.googleapis.com/youtube/v3".to_string(),
            mirrors: vec![
                "https://inv.nadeko.net".to_string(),
                "https://yewtu.be".to_string(),
            ],
            oembed_base: "https://www.youtube.com/oembed".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiSearchEnvelope {
    #[serde(default)]
    items: Vec<ApiSearchItem>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchItem {
    id: ApiVideoId,
    snippet: ApiSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiVideoId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSnippet {
    title: String,
    channel_title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MirrorVideo {
    video_id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    length_seconds: Option<u32>,
}

/// Public connector type for trailer lookup.
pub struct TrailerConnector {
    http: reqwest::Client,
    config: TrailerConfig,
}

impl TrailerConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("shelf-trailer");

    /// Build with default (keyless) settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, ShelfError> {
        Self::new(TrailerConfig::default())
    }

    /// Build with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: TrailerConfig) -> Result<Self, ShelfError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShelfError::Other(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    async fn keyed_search(&self, subject: &str, key: &str) -> Result<Vec<Candidate>, ShelfError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| ShelfError::InvalidArg(format!("bad api base: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ShelfError::InvalidArg("api base cannot be a base".into()))?
            .push("search");
        url.query_pairs_mut()
            .append_pair("part", "snippet")
            .append_pair("type", "video")
            .append_pair("maxResults", "10")
            .append_pair("q", &format!("{subject} trailer"))
            .append_pair("key", key);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ShelfError::connector(NAME, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ShelfError::connector(
                NAME,
                format!("HTTP {}", resp.status()),
            ));
        }
        let envelope: ApiSearchEnvelope = resp
            .json()
            .await
            .map_err(|e| ShelfError::Data(format!("bad api payload: {e}")))?;
        Ok(envelope
            .items
            .into_iter()
            .filter_map(|i| {
                Some(Candidate {
                    video_id: i.id.video_id?,
                    title: i.snippet.title,
                    channel: i.snippet.channel_title.unwrap_or_default(),
                    duration_secs: None,
                })
            })
            .collect())
    }

    async fn mirror_search(&self, mirror: &str, subject: &str) -> Result<Vec<Candidate>, ShelfError> {
        let mut url = Url::parse(mirror)
            .map_err(|e| ShelfError::InvalidArg(format!("bad mirror url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ShelfError::InvalidArg("mirror url cannot be a base".into()))?
            .extend(["api", "v1", "search"]);
        url.query_pairs_mut()
            .append_pair("q", &format!("{subject} trailer"))
            .append_pair("type", "video");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ShelfError::connector(NAME, e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ShelfError::connector(
                NAME,
                format!("HTTP {}", resp.status()),
            ));
        }
        let videos: Vec<MirrorVideo> = resp
            .json()
            .await
            .map_err(|e| ShelfError::Data(format!("bad mirror payload: {e}")))?;
        Ok(videos
            .into_iter()
            .filter_map(|v| {
                Some(Candidate {
                    video_id: v.video_id?,
                    title: v.title.unwrap_or_default(),
                    channel: v.author.unwrap_or_default(),
                    duration_secs: v.length_seconds,
                })
            })
            .collect())
    }

    /// Confirm a watch URL exists via the oEmbed endpoint (200 means yes).
    /// Used only for verification, never discovery.
    async fn oembed_exists(&self, watch_url: &str) -> bool {
        let Ok(mut url) = Url::parse(&self.config.oembed_base) else {
            return false;
        };
        url.query_pairs_mut()
            .append_pair("url", watch_url)
            .append_pair("format", "json");
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn best_candidate(subject: &str, candidates: Vec<Candidate>) -> Option<Candidate> {
        candidates
            .into_iter()
            .map(|c| (score_candidate(&c, subject), c))
            .filter(|(score, _)| *score > 0)
            .max_by_key(|(score, _)| *score)
            .map(|(_, c)| c)
    }
}

impl MediaConnector for TrailerConnector {
    fn name(&self) -> &'static str {
        "shelf-trailer"
    }

    fn supports_kind(&self, _kind: MediaKind) -> bool {
        true
    }

    fn as_trailer_provider(&self) -> Option<&dyn TrailerProvider> {
        Some(self as &dyn TrailerProvider)
    }
}

#[async_trait]
impl TrailerProvider for TrailerConnector {
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError> {
        let subject = &item.title;

        // Keyed API first, when a key is configured. Failures fall through
        // to the mirrors instead of propagating.
        if let Some(key) = self.config.api_key.clone() {
            match self.keyed_search(subject, &key).await {
                Ok(candidates) => {
                    if let Some(best) = Self::best_candidate(subject, candidates) {
                        return Ok(TrailerHit {
                            url: Self::watch_url(&best.video_id),
                            title: Some(best.title),
                            verified: true,
                        });
                    }
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, "keyed trailer search failed, trying mirrors");
                }
            }
        }

        // Mirror walk: each failure advances to the next instance; a winner
        // must pass oEmbed verification before we trust it.
        for mirror in &self.config.mirrors {
            let candidates = match self.mirror_search(mirror, subject).await {
                Ok(c) => c,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(mirror = %mirror, error = %_e, "mirror unreachable");
                    continue;
                }
            };
            if let Some(best) = Self::best_candidate(subject, candidates) {
                let url = Self::watch_url(&best.video_id);
                if self.oembed_exists(&url).await {
                    return Ok(TrailerHit {
                        url,
                        title: Some(best.title),
                        verified: true,
                    });
                }
            }
        }

        Err(ShelfError::not_found(format!("trailer for {subject}")))
    }
}
