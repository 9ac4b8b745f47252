use shelf::Shelf;
use shelf_core::{SearchRequest, ShelfError};

use crate::helpers::{MockConnector, game, m_search};

#[tokio::test]
async fn failed_provider_becomes_a_warning_not_an_error() {
    let healthy = m_search("healthy", vec![game("1", "healthy", "Catan")]);
    let broken = MockConnector::builder()
        .name("broken")
        .with_search_fn(|_req| Err(ShelfError::connector("broken", "HTTP 502")))
        .build();

    let shelf = Shelf::builder()
        .with_connector(healthy)
        .with_connector(broken)
        .build()
        .unwrap();

    let out = shelf
        .search(SearchRequest::builder("catan").build().unwrap())
        .await
        .unwrap();

    assert_eq!(out.response.as_ref().unwrap().results.len(), 1);
    assert_eq!(out.warnings.len(), 1, "the broken provider is reported");
    assert!(out.warnings[0].is_actionable());
}

#[tokio::test]
async fn all_providers_failing_is_an_error() {
    let broken_a = MockConnector::builder()
        .name("broken-a")
        .with_search_fn(|_req| Err(ShelfError::connector("broken-a", "HTTP 500")))
        .build();
    let broken_b = MockConnector::builder()
        .name("broken-b")
        .with_search_fn(|_req| Err(ShelfError::connector("broken-b", "connection refused")))
        .build();

    let shelf = Shelf::builder()
        .with_connector(broken_a)
        .with_connector(broken_b)
        .build()
        .unwrap();

    let err = shelf
        .search(SearchRequest::builder("catan").build().unwrap())
        .await
        .unwrap_err();
    match err {
        ShelfError::AllProvidersFailed(es) => assert_eq!(es.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn empty_but_healthy_is_not_an_error() {
    let empty = m_search("empty", vec![]);
    let shelf = Shelf::builder().with_connector(empty).build().unwrap();

    let out = shelf
        .search(SearchRequest::builder("nonexistent game").build().unwrap())
        .await
        .unwrap();
    assert!(out.response.unwrap().results.is_empty());
    assert!(out.warnings.is_empty(), "no warnings for a clean empty result");
}
