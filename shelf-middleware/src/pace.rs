//! Request-pacing connector wrapper.
//!
//! Enforces a minimum delay between successive upstream requests to one
//! connector. Unlike a budget-style quota, pacing never rejects: callers are
//! delayed until the spacing window has elapsed, then proceed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use shelf_core::connector::{
    DetailsProvider, MediaConnector, RecommendationsProvider, SearchProvider, TrailerProvider,
    TrendingProvider,
};
use shelf_core::{
    DetailsRequest, MediaItem, Middleware, SearchRequest, SearchResponse, ShelfError, TrailerHit,
    TrendingRequest,
};
use shelf_types::{MediaKind, PaceConfig};

/// Wrapper that spaces upstream requests at least `min_delay` apart.
pub struct PacedConnector {
    inner: Arc<dyn MediaConnector>,
    min_delay: Duration,
    // Instant of the most recent admitted request. Held across the sleep so
    // that concurrent callers serialize and each admission stamps before the
    // next caller measures.
    last_request: Mutex<Option<Instant>>,
}

impl PacedConnector {
    /// Create a new pacing wrapper around an existing connector.
    #[must_use]
    pub fn new(inner: Arc<dyn MediaConnector>, config: &PaceConfig) -> Self {
        Self {
            inner,
            min_delay: config.min_delay(),
            last_request: Mutex::new(None),
        }
    }

    /// Access the inner connector.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn MediaConnector> {
        &self.inner
    }

    /// Block until at least `min_delay` has elapsed since the last admitted
    /// request, then stamp the admission time.
    ///
    /// The stamp is taken unconditionally before the upstream call runs, so
    /// the spacing holds regardless of whether that call later succeeds.
    async fn acquire(&self) {
        let mut guard = self.last_request.lock().await;
        if let Some(last) = *guard {
            let elapsed = last.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *guard = Some(Instant::now());
    }
}

/// Middleware config for constructing a [`PacedConnector`].
pub struct PaceMiddleware {
    config: PaceConfig,
}

impl PaceMiddleware {
    /// Capture the configuration to apply at build time.
    #[must_use]
    pub const fn new(config: PaceConfig) -> Self {
        Self { config }
    }
}

impl Middleware for PaceMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn MediaConnector>) -> Arc<dyn MediaConnector> {
        Arc::new(PacedConnector::new(inner, &self.config))
    }

    fn name(&self) -> &'static str {
        "PacedConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "min_delay_ms": self.config.min_delay_ms,
        })
    }
}

impl MediaConnector for PacedConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn supports_kind(&self, kind: MediaKind) -> bool {
        self.inner.supports_kind(kind)
    }

    shelf_core::media_connector_accessors!(inner);
}

#[async_trait]
impl SearchProvider for PacedConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        self.acquire().await;
        self.inner
            .as_search_provider()
            .ok_or_else(|| ShelfError::unsupported("search"))?
            .search(req)
            .await
    }
}

#[async_trait]
impl DetailsProvider for PacedConnector {
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> {
        self.acquire().await;
        self.inner
            .as_details_provider()
            .ok_or_else(|| ShelfError::unsupported("details"))?
            .details(req)
            .await
    }
}

#[async_trait]
impl TrendingProvider for PacedConnector {
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> {
        self.acquire().await;
        self.inner
            .as_trending_provider()
            .ok_or_else(|| ShelfError::unsupported("trending"))?
            .trending(req)
            .await
    }
}

#[async_trait]
impl RecommendationsProvider for PacedConnector {
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        self.acquire().await;
        self.inner
            .as_recommendations_provider()
            .ok_or_else(|| ShelfError::unsupported("recommendations"))?
            .recommendations(item, limit)
            .await
    }
}

#[async_trait]
impl TrailerProvider for PacedConnector {
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError> {
        self.acquire().await;
        self.inner
            .as_trailer_provider()
            .ok_or_else(|| ShelfError::unsupported("trailer"))?
            .trailer(item)
            .await
    }
}
