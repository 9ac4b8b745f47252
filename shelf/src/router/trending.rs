use shelf_core::{Capability, MediaItem, TrendingRequest};

use crate::Shelf;
use crate::shelf_router_fallback;

impl Shelf {
    shelf_router_fallback! {
        /// Fetch the rank-ordered trending list (rank 1 first).
        ///
        /// Behavior and trade-offs:
        /// - A single winner answers: providers are tried in priority order
        ///   (or raced, under the latency strategy) and the first successful
        ///   list is returned as-is; trending lists from different providers
        ///   are never merged because ranks are provider-relative.
        /// - Results are typically served from a shorter-lived cache layer
        ///   than searches, since hot lists churn faster.
        method: trending(req: TrendingRequest) -> Vec<MediaItem>,
        accessor: as_trending_provider,
        capability: Capability::Trending,
        kind: req.kind,
        not_found: "trending titles".to_string(),
        call: trending
    }
}
