//! shelf-core
//!
//! Core types, traits, and utilities shared across the shelf ecosystem.
//!
//! - `media`: the canonical result model (`MediaItem` and per-kind payloads).
//! - `request`: request/response envelopes consumed by connectors and routers.
//! - `connector`: the `MediaConnector` trait and capability provider traits.
//! - `filter`: constraint filtering over normalized results.
//! - `scoring`: relevance scoring and ranking.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. Connector
//! traits are `async_trait` trait objects and middleware implementations
//! guard shared state with `tokio::sync::Mutex`, so code built on these
//! contracts must run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Connector capability traits and the primary `MediaConnector` interface.
pub mod connector;
/// Constraint filtering over normalized results.
pub mod filter;
/// Canonical media data model.
pub mod media;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Request and response envelopes.
pub mod request;
/// Relevance scoring and ranking.
pub mod scoring;

pub use connector::MediaConnector;
pub use media::{
    AlbumDetails, BoardGameDetails, BookDetails, Complexity, Credit, MediaDetails, MediaItem,
    MovieDetails, TrailerHit,
};
pub use middleware::Middleware;
pub use request::{
    DetailsRequest, FilterOptions, SearchReport, SearchRequest, SearchRequestBuilder,
    SearchResponse, SortBy, TrendingRequest,
};
pub use scoring::{Ranked, RelevanceScore};
pub use shelf_types::{
    CacheConfig, Capability, ConnectorKey, FetchStrategy, MediaKind, MiddlewareLayer,
    MiddlewareStack, PaceConfig, ShelfConfig, ShelfError,
};
