use shelf::Shelf;
use shelf_core::{MediaKind, SearchRequest, ShelfError};

use crate::helpers::{MockConnector, album, game};

#[tokio::test]
async fn kind_restriction_skips_ineligible_connectors() {
    let games_only = MockConnector::builder()
        .name("games")
        .supports_kind(MediaKind::BoardGame)
        .returns_search_ok(vec![game("1", "games", "Abbey Road The Board Game")])
        .build();
    let albums_only = MockConnector::builder()
        .name("albums")
        .supports_kind(MediaKind::Album)
        .returns_search_ok(vec![album("2", "albums", "Abbey Road")])
        .build();

    let shelf = Shelf::builder()
        .with_connector(games_only)
        .with_connector(albums_only)
        .build()
        .unwrap();

    let req = SearchRequest::builder("abbey road")
        .kind(MediaKind::Album)
        .build()
        .unwrap();
    let out = shelf.search(req).await.unwrap();
    let results = out.response.unwrap().results;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "albums");
}

#[tokio::test]
async fn no_eligible_connector_is_unsupported() {
    let games_only = MockConnector::builder()
        .name("games")
        .supports_kind(MediaKind::BoardGame)
        .returns_search_ok(vec![])
        .build();

    let shelf = Shelf::builder().with_connector(games_only).build().unwrap();

    let req = SearchRequest::builder("abbey road")
        .kind(MediaKind::Album)
        .build()
        .unwrap();
    let err = shelf.search(req).await.unwrap_err();
    assert!(matches!(err, ShelfError::Unsupported { .. }), "got {err:?}");
}
