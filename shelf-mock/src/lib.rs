use async_trait::async_trait;
use shelf_core::connector::{
    DetailsProvider, MediaConnector, RecommendationsProvider, SearchProvider, TrailerProvider,
    TrendingProvider,
};
use shelf_core::{
    DetailsRequest, MediaItem, MediaKind, SearchRequest, SearchResponse, ShelfError, TrailerHit,
    TrendingRequest,
};

mod fixtures;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Two magic queries tailor failure behavior for tests: a query of `FAIL`
/// returns a forced connector error, and `TIMEOUT` sleeps briefly so the
/// orchestrator's provider timeout can be exercised with a short budget.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> ShelfError {
        ShelfError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(input: &str, capability: &'static str) -> Result<(), ShelfError> {
        match input {
            "FAIL" => Err(ShelfError::connector(
                "shelf-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Simulate brief latency; the orchestrator may time out
                // depending on its configured budget. Keep short to avoid
                // slowing tests excessively.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn fixtures_for_kind(kind: MediaKind) -> Vec<MediaItem> {
        match kind {
            MediaKind::BoardGame => fixtures::boardgames::all(),
            MediaKind::Album => fixtures::albums::all(),
            _ => Vec::new(),
        }
    }
}

impl MediaConnector for MockConnector {
    fn name(&self) -> &'static str {
        "shelf-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_kind(&self, _kind: MediaKind) -> bool {
        true
    }

    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        Some(self as &dyn SearchProvider)
    }
    fn as_details_provider(&self) -> Option<&dyn DetailsProvider> {
        Some(self as &dyn DetailsProvider)
    }
    fn as_trending_provider(&self) -> Option<&dyn TrendingProvider> {
        Some(self as &dyn TrendingProvider)
    }
    fn as_recommendations_provider(&self) -> Option<&dyn RecommendationsProvider> {
        Some(self as &dyn RecommendationsProvider)
    }
    fn as_trailer_provider(&self) -> Option<&dyn TrailerProvider> {
        Some(self as &dyn TrailerProvider)
    }
}

#[async_trait]
impl SearchProvider for MockConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        Self::maybe_fail_or_timeout(req.query(), "search").await?;
        let mut results = Vec::new();
        for kind in [MediaKind::BoardGame, MediaKind::Album] {
            if req.kind().is_none_or(|k| k == kind) {
                let found = match kind {
                    MediaKind::BoardGame => {
                        fixtures::boardgames::search(req.query(), req.exact())
                    }
                    MediaKind::Album => fixtures::albums::search(req.query(), req.exact()),
                    _ => Vec::new(),
                };
                results.extend(found);
            }
        }
        Ok(SearchResponse { results })
    }
}

#[async_trait]
impl DetailsProvider for MockConnector {
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> {
        let lookup: fn(&str) -> Option<MediaItem> = match req.kind {
            MediaKind::BoardGame => fixtures::boardgames::by_id,
            MediaKind::Album => fixtures::albums::by_id,
            _ => |_| None,
        };
        Ok(req.ids.iter().filter_map(|id| lookup(id)).collect())
    }
}

#[async_trait]
impl TrendingProvider for MockConnector {
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> {
        let mut hot = match req.kind {
            Some(MediaKind::BoardGame) | None => fixtures::boardgames::hot(),
            Some(other) => {
                return Err(Self::not_found(&format!("trending for {other}")));
            }
        };
        if let Some(limit) = req.limit {
            hot.truncate(limit);
        }
        Ok(hot)
    }
}

#[async_trait]
impl RecommendationsProvider for MockConnector {
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        let mut related: Vec<MediaItem> = Self::fixtures_for_kind(item.kind)
            .into_iter()
            .filter(|candidate| candidate.id != item.id)
            .collect();
        related.truncate(limit);
        Ok(related)
    }
}

#[async_trait]
impl TrailerProvider for MockConnector {
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError> {
        // Only one fixture has a known preview; everything else declines so
        // the router's fallback chain can be exercised.
        if item.kind == MediaKind::BoardGame && item.id == "13" {
            return Ok(TrailerHit {
                url: "https://www.youtube.com/watch?v=8d8yumMKJLA".to_string(),
                title: Some("Catan: How to Play".to_string()),
                verified: true,
            });
        }
        Err(Self::not_found(&format!("trailer for {}", item.title)))
    }
}
