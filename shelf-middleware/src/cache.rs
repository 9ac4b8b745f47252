use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;

use shelf_core::connector::{
    DetailsProvider, MediaConnector, RecommendationsProvider, SearchProvider, TrailerProvider,
    TrendingProvider,
};
use shelf_core::{
    DetailsRequest, MediaItem, SearchRequest, SearchResponse, ShelfError, TrailerHit,
    TrendingRequest,
};
use shelf_types::{CacheConfig, Capability, MediaKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SearchKey {
    query: String,
    kind: Option<MediaKind>,
    exact: bool,
    limit: Option<usize>,
}

impl From<&SearchRequest> for SearchKey {
    fn from(req: &SearchRequest) -> Self {
        Self {
            query: req.query().to_string(),
            kind: req.kind(),
            exact: req.exact(),
            limit: req.limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DetailsKey {
    kind: MediaKind,
    ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TrendingKey {
    kind: Option<MediaKind>,
    limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ItemKey {
    source: String,
    id: String,
}

impl From<&MediaItem> for ItemKey {
    fn from(item: &MediaItem) -> Self {
        Self {
            source: item.source.clone(),
            id: item.id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecommendationsKey {
    item: ItemKey,
    limit: usize,
}

#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

struct Entry<V> {
    value: V,
    expires_at: std::time::Instant,
}

struct LruTtlStore<K, V> {
    inner: Mutex<LruCache<K, Entry<V>>>,
    ttl: Duration,
}

impl<K, V> LruTtlStore<K, V>
where
    K: std::hash::Hash + Eq,
{
    fn new(capacity: usize, ttl: Duration) -> Self {
        // Avoid zero capacity panics
        let cap = capacity.max(1);
        let cap_nz = std::num::NonZeroUsize::new(cap).unwrap();
        Self {
            inner: Mutex::new(LruCache::new(cap_nz)),
            ttl,
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for LruTtlStore<K, V>
where
    K: Clone + std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.inner.lock().await;
        if let Some(entry) = guard.get_mut(key)
            && std::time::Instant::now() <= entry.expires_at
        {
            return Some(entry.value.clone());
        }
        // If expired, remove it and return None
        guard.pop(key).and_then(|_| None)
    }

    async fn put(&self, key: K, value: V) {
        let expires_at = std::time::Instant::now() + self.ttl;
        let mut guard = self.inner.lock().await;
        guard.put(key, Entry { value, expires_at });
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Capture the configuration to apply at build time.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl shelf_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn MediaConnector>) -> Arc<dyn MediaConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_ttl_ms": self.cfg.default_ttl_ms,
            "default_max_entries": self.cfg.default_max_entries,
            "per_capability_ttl_ms": self.cfg.per_capability_ttl_ms,
            "per_capability_max_entries": self.cfg.per_capability_max_entries,
        })
    }
}

// Per-capability typed stores; `None` means disabled (TTL = 0).
struct Stores {
    search: Option<Arc<dyn CacheStore<SearchKey, Arc<SearchResponse>>>>,
    details: Option<Arc<dyn CacheStore<DetailsKey, Arc<Vec<MediaItem>>>>>,
    trending: Option<Arc<dyn CacheStore<TrendingKey, Arc<Vec<MediaItem>>>>>,
    recommendations: Option<Arc<dyn CacheStore<RecommendationsKey, Arc<Vec<MediaItem>>>>>,
    trailer: Option<Arc<dyn CacheStore<ItemKey, Arc<TrailerHit>>>>,
}

/// Connector wrapper that memoizes successful responses per capability.
///
/// Only successes are stored; errors always propagate uncached. Expiry is
/// lazy on read, so "never cached" and "expired" are indistinguishable to
/// callers, both mean a fresh upstream call.
pub struct CachingConnector {
    inner: Arc<dyn MediaConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Arc<dyn CacheStore<K, V>>>
    where
        K: Clone + std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        let capacity = cfg.capacity_for(cap);
        let store = LruTtlStore::<K, V>::new(capacity, ttl);
        Some(Arc::new(store))
    }

    /// Wrap `inner` with the stores enabled by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn MediaConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            search: Self::maybe_store(cfg, Capability::Search),
            details: Self::maybe_store(cfg, Capability::Details),
            trending: Self::maybe_store(cfg, Capability::Trending),
            recommendations: Self::maybe_store(cfg, Capability::Recommendations),
            trailer: Self::maybe_store(cfg, Capability::Trailer),
        };
        Self { inner, stores }
    }
}

impl MediaConnector for CachingConnector {
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
impl SearchProvider for CachingConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        if let Some(store) = &self.stores.search {
            let key = SearchKey::from(&req);
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_search_provider()
                .ok_or_else(|| ShelfError::unsupported("search"))?;
            let value = inner.search(req).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_search_provider()
            .ok_or_else(|| ShelfError::unsupported("search"))?
            .search(req)
            .await
    }
}

#[async_trait]
impl DetailsProvider for CachingConnector {
    async fn details(&self, req: DetailsRequest) -> Result<Vec<MediaItem>, ShelfError> {
        if let Some(store) = &self.stores.details {
            let key = DetailsKey {
                kind: req.kind,
                ids: req.ids.clone(),
            };
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_details_provider()
                .ok_or_else(|| ShelfError::unsupported("details"))?;
            let value = inner.details(req).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_details_provider()
            .ok_or_else(|| ShelfError::unsupported("details"))?
            .details(req)
            .await
    }
}

#[async_trait]
impl TrendingProvider for CachingConnector {
    async fn trending(&self, req: TrendingRequest) -> Result<Vec<MediaItem>, ShelfError> {
        if let Some(store) = &self.stores.trending {
            let key = TrendingKey {
                kind: req.kind,
                limit: req.limit,
            };
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_trending_provider()
                .ok_or_else(|| ShelfError::unsupported("trending"))?;
            let value = inner.trending(req).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_trending_provider()
            .ok_or_else(|| ShelfError::unsupported("trending"))?
            .trending(req)
            .await
    }
}

#[async_trait]
impl RecommendationsProvider for CachingConnector {
    async fn recommendations(
        &self,
        item: &MediaItem,
        limit: usize,
    ) -> Result<Vec<MediaItem>, ShelfError> {
        if let Some(store) = &self.stores.recommendations {
            let key = RecommendationsKey {
                item: ItemKey::from(item),
                limit,
            };
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_recommendations_provider()
                .ok_or_else(|| ShelfError::unsupported("recommendations"))?;
            let value = inner.recommendations(item, limit).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_recommendations_provider()
            .ok_or_else(|| ShelfError::unsupported("recommendations"))?
            .recommendations(item, limit)
            .await
    }
}

#[async_trait]
impl TrailerProvider for CachingConnector {
    async fn trailer(&self, item: &MediaItem) -> Result<TrailerHit, ShelfError> {
        if let Some(store) = &self.stores.trailer {
            let key = ItemKey::from(item);
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_trailer_provider()
                .ok_or_else(|| ShelfError::unsupported("trailer"))?;
            let value = inner.trailer(item).await?;
            store.put(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_trailer_provider()
            .ok_or_else(|| ShelfError::unsupported("trailer"))?
            .trailer(item)
            .await
    }
}
