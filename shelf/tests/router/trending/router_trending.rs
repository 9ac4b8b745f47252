use shelf::Shelf;
use shelf_core::{MediaKind, ShelfError, TrendingRequest};

use crate::helpers::{MockConnector, game, m_search, m_trending};

#[tokio::test]
async fn trending_lists_are_never_merged_across_providers() {
    let a = m_trending(
        "prov-a",
        vec![game("1", "prov-a", "First"), game("2", "prov-a", "Second")],
    );
    let b = m_trending("prov-b", vec![game("3", "prov-b", "Other")]);

    let shelf = Shelf::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();

    // One provider's list, in its order; ranks are provider-relative.
    assert_eq!(hot.len(), 2);
    assert!(hot.iter().all(|i| i.source == "prov-a"));
}

#[tokio::test]
async fn connectors_without_the_capability_are_skipped() {
    let search_only = m_search("search-only", vec![]);
    let trending = m_trending("trends", vec![game("1", "trends", "Hot")]);

    let shelf = Shelf::builder()
        .with_connector(search_only)
        .with_connector(trending)
        .build()
        .unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap();
    assert_eq!(hot[0].source, "trends");
}

#[tokio::test]
async fn limit_reaches_the_provider() {
    let connector = MockConnector::builder()
        .name("trends")
        .with_trending_fn(|req| {
            let mut items = vec![
                game("1", "trends", "First"),
                game("2", "trends", "Second"),
                game("3", "trends", "Third"),
            ];
            if let Some(limit) = req.limit {
                items.truncate(limit);
            }
            Ok(items)
        })
        .build();

    let shelf = Shelf::builder().with_connector(connector).build().unwrap();

    let hot = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame).with_limit(2))
        .await
        .unwrap();
    assert_eq!(hot.len(), 2);
}

#[tokio::test]
async fn nobody_trending_is_unsupported() {
    let search_only = m_search("search-only", vec![]);
    let shelf = Shelf::builder().with_connector(search_only).build().unwrap();

    let err = shelf
        .trending(TrendingRequest::for_kind(MediaKind::BoardGame))
        .await
        .unwrap_err();
    assert!(matches!(err, ShelfError::Unsupported { .. }), "got {err:?}");
}
