//! shelf-bgg
//!
//! BoardGameGeek connector for the shelf ecosystem. Implements search,
//! batched details, the hot list, and overlap-based recommendations on top
//! of the public XML API v2.
#![warn(missing_docs)]

/// HTTP client over the XML API endpoints.
pub mod client;
/// Raw-record normalization into the canonical model.
pub mod normalize;
/// Event-based XML parsers.
pub mod xml;

use std::collections::HashSet;

use async_trait::async_trait;

use shelf_core::connector::{
    ConnectorKey, DetailsProvider, MediaConnector, RecommendationsProvider, SearchProvider,
    TrendingProvider,
};
use shelf_core::{
    DetailsRequest, MediaItem, MediaKind, SearchRequest, SearchResponse, ShelfError,
    TrendingRequest,
};

pub use client::{BggClient, BggConfig};

/// How many preliminary search hits get their statistics fetched. Matches
/// the thing endpoint's per-request batch bound.
const SEARCH_DETAIL_LIMIT: usize = 20;

/// How many hot-list entries are considered when building recommendations.
const RECOMMENDATION_POOL: usize = 20;

/// Public connector type for BoardGameGeek.
pub struct BggConnector {
    client: BggClient,
}

impl BggConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("shelf-bgg");

    /// Build against the public API with default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, ShelfError> {
        Self::new(&BggConfig::default())
    }

    /// Build with explicit configuration (base URL, timeout, retry backoff).
    ///
    /// # Errors
    /// Returns an error for an unparseable base URL or HTTP client failure.
    pub fn new(config: &BggConfig) -> Result<Self, ShelfError> {
        Ok(Self {
            client: BggClient::new(config)?,
        })
    }

    fn category_and_mechanic_ids(item: &MediaItem) -> HashSet<String> {
        item.board_game()
            .map(|game| {
                game.categories
                    .iter()
                    .chain(game.mechanics.iter())
                    .map(|c| c.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl MediaConnector for BggConnector {
    fn name(&self) -> &'static str {
        "shelf-bgg"
    }

    fn vendor(&self) -> &'static str {
        "BoardGameGeek"
    }

    fn supports_kind(&self, kind: MediaKind) -> bool {
        kind == MediaKind::BoardGame
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
}

#[async_trait]
impl SearchProvider for BggConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        let found = self.client.search(req.query(), req.exact()).await?;
        if found.is_empty() {
            return Ok(SearchResponse::default());
        }

        // The search endpoint only yields id/name/year; fetch statistics for
        // a bounded batch so results carry ratings and player bounds.
        let ids: Vec<String> = found
            .iter()
            .take(SEARCH_DETAIL_LIMIT)
            .map(|i| i.id.clone())
            .collect();
        let things = self.client.things(&ids).await?;
        if things.is_empty() {
            // Details still processing upstream; render the preliminary
            // records rather than nothing.
            return Ok(SearchResponse {
                results: found.into_iter().map(normalize::search_item_to_item).collect(),
            });
        }
        Ok(SearchResponse {
            results: things.into_iter().map(normalize::thing_to_item).collect(),
        })
    }
}

#[async_trait]
impl DetailsProvider for BggConnector {
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> {
        if req.kind != MediaKind::BoardGame {
            return Err(ShelfError::unsupported(format!("details/{}", req.kind)));
        }
        let things = self.client.things(&req.ids).await?;
        Ok(things.into_iter().map(normalize::thing_to_item).collect())
    }
}

#[async_trait]
impl TrendingProvider for BggConnector {
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> {
        let mut hot: Vec<MediaItem> = self
            .client
            .hot()
            .await?
            .into_iter()
            .map(normalize::hot_item_to_item)
            .collect();
        if let Some(limit) = req.limit {
            hot.truncate(limit);
        }
        Ok(hot)
    }
}

#[async_trait]
impl RecommendationsProvider for BggConnector {
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        // Make sure the seed carries categories/mechanics; a bare search hit
        // needs one details round-trip first.
        let seed = if item.board_game().is_some() {
            item.clone()
        } else {
            self.client
                .things(std::slice::from_ref(&item.id))
                .await?
                .into_iter()
                .map(normalize::thing_to_item)
                .next()
                .ok_or_else(|| ShelfError::not_found(format!("details for {}", item.id)))?
        };
        let wanted = Self::category_and_mechanic_ids(&seed);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let pool_ids: Vec<String> = self
            .client
            .hot()
            .await?
            .into_iter()
            .filter(|h| h.id != item.id)
            .take(RECOMMENDATION_POOL)
            .map(|h| h.id)
            .collect();
        let candidates = self.client.things(&pool_ids).await?;

        let mut scored: Vec<(usize, MediaItem)> = candidates
            .into_iter()
            .map(normalize::thing_to_item)
            .map(|candidate| {
                let have = Self::category_and_mechanic_ids(&candidate);
                (wanted.intersection(&have).count(), candidate)
            })
            .filter(|(overlap, _)| *overlap > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().take(limit).map(|(_, c)| c).collect())
    }
}
