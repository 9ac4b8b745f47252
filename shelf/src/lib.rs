//! Shelf orchestrates media-metadata requests across multiple providers.
//!
//! Overview
//! - Routes requests to connectors that implement the `shelf_core` contracts.
//! - Applies per-kind priorities to influence provider order.
//! - Merges, filters, and relevance-ranks search results from concurrent
//!   provider fan-outs; single-winner capabilities (trending, details,
//!   recommendations) fall back across providers instead.
//! - Normalizes error handling and exposes uniform domain types from
//!   `shelf_core`.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout,
//!     aggregates errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible providers; lowest tail latency but higher request fanout.
//! - Search: fan-out with `(source, id)` de-duplication; equal ids from
//!   different providers are unrelated records and never merge. Per-provider
//!   failures become report warnings instead of failing the whole call, so
//!   one broken provider never blanks the screen.
//! - Ranking: title/quality/popularity subscores recomputed per call; the
//!   caller's sort preference is a soft bias (1.5x on one subscore), not a
//!   hard sort override.
//! - Trailer lookup: an ordered strategy chain (known-title table, trailer
//!   providers, constructed search URL) that always produces a renderable
//!   hit and never errors.
//!
//! Examples
//! Building an orchestrator with middleware-wrapped connectors:
//! ```rust,ignore
//! use std::sync::Arc;
//! use shelf::{MediaKind, Shelf};
//! use shelf_middleware::ConnectorBuilder;
//! use shelf_types::{CacheConfig, PaceConfig};
//!
//! let bgg = ConnectorBuilder::new(Arc::new(shelf_bgg::BggConnector::new_default()?))
//!     .with_cache(&CacheConfig::default())
//!     .with_pace(&PaceConfig::default()) // BGG documents 1 req/sec
//!     .build();
//! let itunes = Arc::new(shelf_itunes::ItunesConnector::new_default()?);
//!
//! let shelf = Shelf::builder()
//!     .with_connector(bgg)
//!     .with_connector(itunes)
//!     .build()?;
//! ```
//!
//! Searching and ranking:
//! ```rust,ignore
//! use shelf::{MediaKind, SearchRequest, SortBy};
//!
//! let req = SearchRequest::builder("catan")
//!     .kind(MediaKind::BoardGame)
//!     .sort(SortBy::Rating)
//!     .limit(10)
//!     .build()?;
//! let report = shelf.search(req).await?;
//! for item in report.response.unwrap_or_default().results {
//!     println!("{} ({})", item.title, item.year.unwrap_or(0));
//! }
//! ```
//!
//! Trailer lookup (infallible):
//! ```rust,ignore
//! let hit = shelf.trailer(&item).await;
//! println!("{}", hit.url); // always renderable, possibly a search page
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Shelf, ShelfBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

pub use shelf_middleware::{CacheMiddleware, ConnectorBuilder, PaceMiddleware};

// Re-export core types for convenience
pub use shelf_core::{
    AlbumDetails,
    BoardGameDetails,
    BookDetails,
    CacheConfig,
    Capability,
    Complexity,
    ConnectorKey,
    Credit,
    DetailsRequest,
    FetchStrategy,
    FilterOptions,
    MediaConnector,
    MediaDetails,
    MediaItem,
    MediaKind,
    MovieDetails,
    PaceConfig,
    Ranked,
    RelevanceScore,
    SearchReport,
    SearchRequest,
    SearchResponse,
    ShelfConfig,
    ShelfError,
    SortBy,
    TrailerHit,
    TrendingRequest,
};
