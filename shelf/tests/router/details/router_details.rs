use shelf::Shelf;
use shelf_core::{DetailsRequest, MediaKind, ShelfError};

use crate::helpers::{MockConnector, game};

#[tokio::test]
async fn details_route_to_a_kind_eligible_provider() {
    let games = MockConnector::builder()
        .name("games")
        .supports_kind(MediaKind::BoardGame)
        .with_details_fn(|req| {
            // Unknown ids are simply absent from the answer.
            Ok(req
                .ids
                .iter()
                .filter(|id| id.as_str() == "13")
                .map(|id| game(id, "games", "Catan"))
                .collect())
        })
        .build();

    let shelf = Shelf::builder().with_connector(games).build().unwrap();

    let items = shelf
        .details(DetailsRequest::new(
            MediaKind::BoardGame,
            ["13", "does-not-exist"],
        ))
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "13");
}

#[tokio::test]
async fn kind_mismatch_is_unsupported() {
    let games = MockConnector::builder()
        .name("games")
        .supports_kind(MediaKind::BoardGame)
        .returns_details_ok(vec![])
        .build();

    let shelf = Shelf::builder().with_connector(games).build().unwrap();

    let err = shelf
        .details(DetailsRequest::new(MediaKind::Album, ["1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ShelfError::Unsupported { .. }), "got {err:?}");
}
