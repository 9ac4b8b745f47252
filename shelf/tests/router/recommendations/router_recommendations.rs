use shelf::Shelf;
use shelf_core::ShelfError;

use crate::helpers::{MockConnector, game};

#[tokio::test]
async fn declining_provider_falls_through_to_the_next() {
    let clueless = MockConnector::builder()
        .name("clueless")
        .with_recommendations_fn(|item, _limit| {
            Err(ShelfError::not_found(format!("recommendations for {}", item.title)))
        })
        .build();
    let helpful = MockConnector::builder()
        .name("helpful")
        .returns_recommendations_ok(vec![
            game("174430", "helpful", "Gloomhaven"),
            game("266192", "helpful", "Wingspan"),
        ])
        .build();

    let shelf = Shelf::builder()
        .with_connector(clueless)
        .with_connector(helpful)
        .build()
        .unwrap();

    let seed = game("13", "helpful", "Catan");
    let related = shelf.recommendations(&seed, 1).await.unwrap();
    assert_eq!(related.len(), 1, "the provider honors the limit");
    assert_eq!(related[0].source, "helpful");
}

#[tokio::test]
async fn everyone_declining_collapses_to_not_found() {
    let clueless = MockConnector::builder()
        .name("clueless")
        .with_recommendations_fn(|item, _limit| {
            Err(ShelfError::not_found(format!("recommendations for {}", item.title)))
        })
        .build();

    let shelf = Shelf::builder().with_connector(clueless).build().unwrap();

    let seed = game("13", "x", "Catan");
    let err = shelf.recommendations(&seed, 5).await.unwrap_err();
    match err {
        ShelfError::NotFound { what } => assert_eq!(what, "recommendations for Catan"),
        other => panic!("unexpected: {other:?}"),
    }
}
