use shelf::Shelf;
use shelf_core::{FilterOptions, SearchRequest};

use crate::helpers::{m_search, rated_game};

#[tokio::test]
async fn constraints_prune_results_without_erroring() {
    let a = m_search(
        "prov-a",
        vec![
            rated_game("1", "prov-a", "Azul", 4.5, 10_000, 100),
            rated_game("2", "prov-a", "Azul Mini", 2.1, 500, 90_000),
        ],
    );

    let shelf = Shelf::builder().with_connector(a).build().unwrap();

    let req = SearchRequest::builder("azul")
        .filters(FilterOptions {
            min_rating: Some(4.0),
            ..Default::default()
        })
        .build()
        .unwrap();
    let out = shelf.search(req).await.unwrap();
    let results = out.response.unwrap().results;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
}

#[tokio::test]
async fn filters_emptying_the_result_set_is_still_healthy() {
    let a = m_search(
        "prov-a",
        vec![rated_game("1", "prov-a", "Azul", 3.0, 10_000, 100)],
    );

    let shelf = Shelf::builder().with_connector(a).build().unwrap();

    let req = SearchRequest::builder("azul")
        .filters(FilterOptions {
            min_rating: Some(4.9),
            ..Default::default()
        })
        .build()
        .unwrap();
    let out = shelf.search(req).await.unwrap();

    assert!(out.response.unwrap().results.is_empty());
    assert!(out.warnings.is_empty(), "filtered-to-empty is not a failure");
}
