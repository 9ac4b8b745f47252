use std::time::{Duration, Instant};

use shelf::Shelf;
use shelf_core::{FetchStrategy, MediaKind, ShelfError, TrendingRequest};

use crate::helpers::{MockConnector, game, m_trending};

#[tokio::test]
async fn priority_with_fallback_tries_the_next_provider_on_failure() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_trending_fn(|_req| Err(ShelfError::connector("broken", "HTTP 503")))
        .build();
    let healthy = m_trending("healthy", vec![game("1", "healthy", "Catan")]);

    let shelf = Shelf::builder()
        .with_connector(broken)
        .with_connector(healthy)
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "healthy");
}

#[tokio::test]
async fn latency_strategy_returns_the_fastest_success() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(300))
        .returns_trending_ok(vec![game("1", "slow", "Slow Result")])
        .build();
    let fast = m_trending("fast", vec![game("2", "fast", "Fast Result")]);

    // `slow` has priority under fallback; under latency, `fast` wins the race.
    let shelf = Shelf::builder()
        .with_connector(slow)
        .with_connector(fast)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let started = Instant::now();
    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "fast");
    assert!(started.elapsed() < Duration::from_millis(250));
}

#[tokio::test]
async fn all_providers_timing_out_collapses_to_one_error() {
    let sleepy_a = MockConnector::builder()
        .name("sleepy-a")
        .delay(Duration::from_millis(500))
        .returns_trending_ok(vec![])
        .build();
    let sleepy_b = MockConnector::builder()
        .name("sleepy-b")
        .delay(Duration::from_millis(500))
        .returns_trending_ok(vec![])
        .build();

    let shelf = Shelf::builder()
        .with_connector(sleepy_a)
        .with_connector(sleepy_b)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShelfError::AllProvidersTimedOut { .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = MockConnector::builder()
        .name("a")
        .with_trending_fn(|_req| Err(ShelfError::not_found("nothing hot")))
        .build();
    let b = MockConnector::builder()
        .name("b")
        .with_trending_fn(|_req| Err(ShelfError::not_found("nothing hot either")))
        .build();

    let shelf = Shelf::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap_err();
    match err {
        ShelfError::NotFound { what } => assert_eq!(what, "trending titles"),
        other => panic!("unexpected: {other:?}"),
    }
}
