use async_trait::async_trait;

pub use shelf_types::ConnectorKey;
use shelf_types::{MediaKind, ShelfError};

use crate::media::{MediaItem, TrailerHit};
use crate::request::{DetailsRequest, SearchRequest, SearchResponse, TrendingRequest};

/// Focused role trait for connectors that can search titles.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a title search according to the provided request.
    ///
    /// Implementations return normalized results in provider order; ranking
    /// happens in the router, not here.
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError>;
}

/// Focused role trait for connectors that provide batched detail lookups.
#[async_trait]
pub trait DetailsProvider: Send + Sync {
    /// Fetch full records for a batch of provider ids.
    ///
    /// Unknown ids are simply absent from the output; a malformed record is
    /// dropped (and logged) without aborting its siblings.
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError>;
}

/// Focused role trait for connectors that expose a hot/trending list.
#[async_trait]
pub trait TrendingProvider: Send + Sync {
    /// Fetch the rank-ordered trending list (rank 1 first).
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError>;
}

/// Focused role trait for connectors that can recommend related titles.
#[async_trait]
pub trait RecommendationsProvider: Send + Sync {
    /// Fetch up to `limit` titles related to `item`.
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError>;
}

/// Focused role trait for connectors that can locate a trailer or preview.
#[async_trait]
pub trait TrailerProvider: Send + Sync {
    /// Look up a trailer for `item`.
    ///
    /// A `NotFound` error is the explicit "decline" that advances the
    /// router's fallback chain; any other error is treated the same way but
    /// logged as a failure rather than a miss.
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
pub trait MediaConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "shelf-bgg", "shelf-itunes").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring per-kind priorities.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to support a given media kind.
    ///
    /// Default: returns `false` for all kinds. Connectors must explicitly
    /// override this method to declare which kinds they support.
    fn supports_kind(&self, kind: MediaKind) -> bool {
        let _ = kind;
        false
    }

    /// Advertise search capability by returning a usable trait object reference when supported.
    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        None
    }

    /// If implemented, returns a trait object for batched detail lookups.
    fn as_details_provider(&self) -> Option<&dyn DetailsProvider> {
        None
    }

    /// If implemented, returns a trait object for the trending list.
    fn as_trending_provider(&self) -> Option<&dyn TrendingProvider> {
        None
    }

    /// If implemented, returns a trait object for recommendations.
    fn as_recommendations_provider(&self) -> Option<&dyn RecommendationsProvider> {
        None
    }

    /// If implemented, returns a trait object for trailer lookup.
    fn as_trailer_provider(&self) -> Option<&dyn TrailerProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `MediaConnector` by delegating to an inner field.
#[macro_export]
macro_rules! media_connector_accessors {
    ($inner:ident) => {
        fn as_search_provider(&self) -> Option<&dyn $crate::connector::SearchProvider> {
            if self.$inner.as_search_provider().is_some() {
                Some(self as &dyn $crate::connector::SearchProvider)
            } else {
                None
            }
        }
        fn as_details_provider(&self) -> Option<&dyn $crate::connector::DetailsProvider> {
            if self.$inner.as_details_provider().is_some() {
                Some(self as &dyn $crate::connector::DetailsProvider)
            } else {
                None
            }
        }
        fn as_trending_provider(&self) -> Option<&dyn $crate::connector::TrendingProvider> {
            if self.$inner.as_trending_provider().is_some() {
                Some(self as &dyn $crate::connector::TrendingProvider)
            } else {
                None
            }
        }
        fn as_recommendations_provider(
            &self,
        ) -> Option<&dyn $crate::connector::RecommendationsProvider> {
            if self.$inner.as_recommendations_provider().is_some() {
                Some(self as &dyn $crate::connector::RecommendationsProvider)
            } else {
                None
            }
        }
        fn as_trailer_provider(&self) -> Option<&dyn $crate::connector::TrailerProvider> {
            if self.$inner.as_trailer_provider().is_some() {
                Some(self as &dyn $crate::connector::TrailerProvider)
            } else {
                None
            }
        }
    };
}
