//! Configuration types shared across the orchestrator and connectors.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Capability, ConnectorKey, kind::MediaKind};

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Configuration for the per-capability response cache middleware.
///
/// A TTL of zero disables caching for that capability entirely. The default
/// TTL is one hour; `trending` is overridden to 30 minutes out of the box
/// because hot lists churn faster than search or detail records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL applied to capabilities without an explicit override, in milliseconds.
    pub default_ttl_ms: u64,
    /// LRU capacity applied to capabilities without an explicit override.
    pub default_max_entries: usize,
    /// Per-capability TTL overrides, keyed by `Capability::as_str`.
    pub per_capability_ttl_ms: HashMap<String, u64>,
    /// Per-capability LRU capacity overrides, keyed by `Capability::as_str`.
    pub per_capability_max_entries: HashMap<String, usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let mut per_capability_ttl_ms = HashMap::new();
        per_capability_ttl_ms.insert(Capability::Trending.as_str().to_string(), 1_800_000);
        Self {
            default_ttl_ms: 3_600_000,
            default_max_entries: 512,
            per_capability_ttl_ms,
            per_capability_max_entries: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// Effective TTL for a capability; `None` means caching is disabled for it.
    #[must_use]
    pub fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        let ms = self
            .per_capability_ttl_ms
            .get(cap.as_str())
            .copied()
            .unwrap_or(self.default_ttl_ms);
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Effective LRU capacity for a capability.
    #[must_use]
    pub fn capacity_for(&self, cap: Capability) -> usize {
        self.per_capability_max_entries
            .get(cap.as_str())
            .copied()
            .unwrap_or(self.default_max_entries)
    }
}

/// Configuration for the request-pacing middleware.
///
/// Enforces a minimum delay between successive upstream requests to one
/// connector (BoardGameGeek documents one request per second).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaceConfig {
    /// Minimum spacing between upstream requests, in milliseconds.
    pub min_delay_ms: u64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self { min_delay_ms: 1_000 }
    }
}

impl PaceConfig {
    /// Minimum spacing as a `Duration`.
    #[must_use]
    pub const fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }
}

/// Global configuration for the `Shelf` orchestrator.
#[derive(Debug, Clone)]
pub struct ShelfConfig {
    /// Preferred connector order per media kind; unlisted but capable
    /// connectors are still considered after the listed ones.
    pub per_kind_priority: HashMap<MediaKind, Vec<ConnectorKey>>,
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out aggregations (e.g., search).
    /// If set, operations that aggregate multiple provider calls are bounded by it.
    pub request_timeout: Option<Duration>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            per_kind_priority: HashMap::new(),
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}
