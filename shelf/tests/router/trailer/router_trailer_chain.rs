use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use shelf::Shelf;
use shelf_core::{ShelfError, TrailerHit};

use crate::helpers::{MockConnector, game, m_search};

#[tokio::test]
async fn known_title_wins_without_asking_any_provider() {
    let asked = Arc::new(AtomicBool::new(false));
    let asked_probe = asked.clone();
    let provider = MockConnector::builder()
        .name("probe")
        .with_trailer_fn(move |item| {
            asked_probe.store(true, Ordering::SeqCst);
            Err(ShelfError::not_found(format!("trailer for {}", item.title)))
        })
        .build();

    let shelf = Shelf::builder().with_connector(provider).build().unwrap();

    let hit = shelf.trailer(&game("13", "x", "Catan")).await;
    assert!(hit.verified);
    assert!(hit.url.contains("watch?v="));
    assert!(!asked.load(Ordering::SeqCst), "table hit short-circuits");
}

#[tokio::test]
async fn fuzzy_table_match_covers_edition_suffixes() {
    let shelf = Shelf::builder()
        .with_connector(m_search("noop", vec![]))
        .build()
        .unwrap();

    let hit = shelf.trailer(&game("13", "x", "Catan: 25th Anniversary Edition")).await;
    assert!(hit.verified, "the base title inside the longer one matches");
}

#[tokio::test]
async fn provider_hit_is_used_for_unknown_titles() {
    let provider = MockConnector::builder()
        .name("lookup")
        .returns_trailer_ok(TrailerHit {
            url: "https://www.youtube.com/watch?v=xyz987".to_string(),
            title: Some("Obscure Game Trailer".to_string()),
            verified: true,
        })
        .build();

    let shelf = Shelf::builder().with_connector(provider).build().unwrap();

    let hit = shelf.trailer(&game("999", "x", "Some Obscure Game")).await;
    assert_eq!(hit.url, "https://www.youtube.com/watch?v=xyz987");
}

#[tokio::test]
async fn exhausted_chain_still_returns_a_renderable_url() {
    let declines = MockConnector::builder().name("declines").declines_trailer().build();
    let errors = MockConnector::builder()
        .name("errors")
        .with_trailer_fn(|_item| Err(ShelfError::connector("errors", "mirror down")))
        .build();

    let shelf = Shelf::builder()
        .with_connector(declines)
        .with_connector(errors)
        .build()
        .unwrap();

    let hit = shelf.trailer(&game("999", "x", "Some Obscure Game")).await;
    assert!(!hit.verified);
    assert!(
        hit.url.starts_with("https://www.youtube.com/results?"),
        "final fallback is a search-results page: {}",
        hit.url
    );
    assert!(hit.url.contains("Some+Obscure+Game"));
}
