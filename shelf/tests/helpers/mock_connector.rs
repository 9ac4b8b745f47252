#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::connector::{
    DetailsProvider, MediaConnector, RecommendationsProvider, SearchProvider, TrailerProvider,
    TrendingProvider,
};
use shelf_core::{
    DetailsRequest, MediaItem, MediaKind, SearchRequest, SearchResponse, ShelfError, TrailerHit,
    TrendingRequest,
};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// Tailor behavior (success/fail, supported kinds, latency) via the builder.
pub struct MockConnector {
    pub name: &'static str,
    pub kind_ok: Option<MediaKind>,
    pub delay_ms: u64,

    pub search_fn:
        Option<Arc<dyn Fn(SearchRequest) -> Result<SearchResponse, ShelfError> + Send + Sync>>,
    pub details_fn:
        Option<Arc<dyn Fn(DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>>,
    pub trending_fn:
        Option<Arc<dyn Fn(TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>>,
    pub recommendations_fn: Option<
        Arc<dyn Fn(&MediaItem, usize) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>,
    >,
    pub trailer_fn:
        Option<Arc<dyn Fn(&MediaItem) -> Result<TrailerHit, ShelfError> + Send + Sync>>,
}

impl MediaConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports_kind(&self, kind: MediaKind) -> bool {
        self.kind_ok.as_ref().is_none_or(|k| k == &kind)
    }

    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        if self.search_fn.is_some() {
            Some(self as &dyn SearchProvider)
        } else {
            None
        }
    }

    fn as_details_provider(&self) -> Option<&dyn DetailsProvider> {
        if self.details_fn.is_some() {
            Some(self as &dyn DetailsProvider)
        } else {
            None
        }
    }

    fn as_trending_provider(&self) -> Option<&dyn TrendingProvider> {
        if self.trending_fn.is_some() {
            Some(self as &dyn TrendingProvider)
        } else {
            None
        }
    }

    fn as_recommendations_provider(&self) -> Option<&dyn RecommendationsProvider> {
        if self.recommendations_fn.is_some() {
            Some(self as &dyn RecommendationsProvider)
        } else {
            None
        }
    }

    fn as_trailer_provider(&self) -> Option<&dyn TrailerProvider> {
        if self.trailer_fn.is_some() {
            Some(self as &dyn TrailerProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl SearchProvider for MockConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.search_fn {
            return (f)(req);
        }
        Err(ShelfError::unsupported("search"))
    }
}

#[async_trait]
impl DetailsProvider for MockConnector {
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.details_fn {
            return (f)(req);
        }
        Err(ShelfError::unsupported("details"))
    }
}

#[async_trait]
impl TrendingProvider for MockConnector {
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.trending_fn {
            return (f)(req);
        }
        Err(ShelfError::unsupported("trending"))
    }
}

#[async_trait]
impl RecommendationsProvider for MockConnector {
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.recommendations_fn {
            return (f)(item, limit);
        }
        Err(ShelfError::unsupported("recommendations"))
    }
}

#[async_trait]
impl TrailerProvider for MockConnector {
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.trailer_fn {
            return (f)(item);
        }
        Err(ShelfError::unsupported("trailer"))
    }
}

/* ---------- Tiny builder helpers used by tests ---------- */

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    kind_ok: Option<MediaKind>,
    delay_ms: u64,
    search_fn:
        Option<Arc<dyn Fn(SearchRequest) -> Result<SearchResponse, ShelfError> + Send + Sync>>,
    details_fn:
        Option<Arc<dyn Fn(DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>>,
    trending_fn:
        Option<Arc<dyn Fn(TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>>,
    recommendations_fn: Option<
        Arc<dyn Fn(&MediaItem, usize) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync>,
    >,
    trailer_fn:
        Option<Arc<dyn Fn(&MediaItem) -> Result<TrailerHit, ShelfError> + Send + Sync>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            kind_ok: None,
            delay_ms: 0,
            search_fn: None,
            details_fn: None,
            trending_fn: None,
            recommendations_fn: None,
            trailer_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
    pub fn supports_kind(mut self, kind: MediaKind) -> Self {
        self.kind_ok = Some(kind);
        self
    }
    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_search_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(SearchRequest) -> Result<SearchResponse, ShelfError> + Send + Sync + 'static,
    {
        self.search_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_search_ok(mut self, results: Vec<MediaItem>) -> Self {
        self.search_fn = Some(Arc::new(move |_req| {
            Ok(SearchResponse {
                results: results.clone(),
            })
        }));
        self
    }

    pub fn with_details_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync + 'static,
    {
        self.details_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_details_ok(mut self, items: Vec<MediaItem>) -> Self {
        self.details_fn = Some(Arc::new(move |_req| Ok(items.clone())));
        self
    }

    pub fn with_trending_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync + 'static,
    {
        self.trending_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_trending_ok(mut self, items: Vec<MediaItem>) -> Self {
        self.trending_fn = Some(Arc::new(move |_req| Ok(items.clone())));
        self
    }

    pub fn with_recommendations_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&MediaItem, usize) -> Result<Vec<MediaItem>, ShelfError> + Send + Sync + 'static,
    {
        self.recommendations_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_recommendations_ok(mut self, items: Vec<MediaItem>) -> Self {
        self.recommendations_fn = Some(Arc::new(move |_item, limit| {
            let mut out = items.clone();
            out.truncate(limit);
            Ok(out)
        }));
        self
    }

    pub fn with_trailer_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&MediaItem) -> Result<TrailerHit, ShelfError> + Send + Sync + 'static,
    {
        self.trailer_fn = Some(Arc::new(f));
        self
    }
    pub fn returns_trailer_ok(mut self, hit: TrailerHit) -> Self {
        self.trailer_fn = Some(Arc::new(move |_item| Ok(hit.clone())));
        self
    }
    pub fn declines_trailer(mut self) -> Self {
        self.trailer_fn = Some(Arc::new(|item| {
            Err(ShelfError::not_found(format!("trailer for {}", item.title)))
        }));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            kind_ok: self.kind_ok,
            delay_ms: self.delay_ms,
            search_fn: self.search_fn,
            details_fn: self.details_fn,
            trending_fn: self.trending_fn,
            recommendations_fn: self.recommendations_fn,
            trailer_fn: self.trailer_fn,
        })
    }
}

/// Convenience constructor for a search-only mock connector.
pub fn m_search(name: &'static str, items: Vec<MediaItem>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_search_ok(items)
        .build()
}

/// Convenience constructor for a trending-only mock connector.
pub fn m_trending(name: &'static str, items: Vec<MediaItem>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_trending_ok(items)
        .build()
}
