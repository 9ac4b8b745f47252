use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use shelf_core::connector::{MediaConnector, SearchProvider};
use shelf_core::{MediaKind, SearchRequest, SearchResponse, ShelfError};
use shelf_middleware::ConnectorBuilder;
use shelf_mock::MockConnector;
use shelf_types::CacheConfig;

struct CountingSearchConnector {
    inner: Arc<dyn MediaConnector>,
    count: Arc<AtomicUsize>,
}

impl MediaConnector for CountingSearchConnector {
    fn name(&self) -> &'static str {
        "counting"
    }
    fn vendor(&self) -> &'static str {
        "test"
    }
    fn supports_kind(&self, _k: MediaKind) -> bool {
        true
    }
    fn as_search_provider(&self) -> Option<&dyn SearchProvider> {
        Some(self as &dyn SearchProvider)
    }
}

#[async_trait::async_trait]
impl SearchProvider for CountingSearchConnector {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ShelfError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.as_search_provider().unwrap().search(req).await
    }
}

fn counting(count: &Arc<AtomicUsize>) -> Arc<dyn MediaConnector> {
    Arc::new(CountingSearchConnector {
        inner: Arc::new(MockConnector::new()),
        count: count.clone(),
    })
}

#[tokio::test]
async fn repeated_search_within_ttl_hits_upstream_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let wrapped = ConnectorBuilder::new(counting(&count))
        .with_cache(&CacheConfig::default())
        .build();
    let s = wrapped.as_search_provider().unwrap();

    let req = SearchRequest::builder("catan").build().unwrap();
    let first = s.search(req.clone()).await.unwrap();
    let second = s.search(req).await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1, "second call must be a hit");
    assert_eq!(first, second, "cached response is deep-equal to the first");
}

#[tokio::test]
async fn different_queries_use_different_entries() {
    let count = Arc::new(AtomicUsize::new(0));
    let wrapped = ConnectorBuilder::new(counting(&count))
        .with_cache(&CacheConfig::default())
        .build();
    let s = wrapped.as_search_provider().unwrap();

    let _ = s
        .search(SearchRequest::builder("catan").build().unwrap())
        .await
        .unwrap();
    let _ = s
        .search(SearchRequest::builder("wingspan").build().unwrap())
        .await
        .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let count = Arc::new(AtomicUsize::new(0));
    let wrapped = ConnectorBuilder::new(counting(&count))
        .with_cache(&CacheConfig::default())
        .build();
    let s = wrapped.as_search_provider().unwrap();

    // The mock's magic FAIL query errors; both attempts must reach upstream.
    let req = SearchRequest::builder("FAIL").build().unwrap();
    assert!(s.search(req.clone()).await.is_err());
    assert!(s.search(req).await.is_err());

    assert_eq!(count.load(Ordering::SeqCst), 2);
}
