use shelf::Shelf;
use shelf_core::{SearchRequest, SortBy};

use crate::helpers::{game, m_search, rated_game};

#[tokio::test]
async fn exact_title_match_outranks_partial_regardless_of_merge_order() {
    // The partial match arrives first from a higher-registered provider.
    let a = m_search("prov-a", vec![game("1", "prov-a", "Catan: Seafarers")]);
    let b = m_search("prov-b", vec![game("2", "prov-b", "Catan")]);

    let shelf = Shelf::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let out = shelf
        .search(SearchRequest::builder("catan").build().unwrap())
        .await
        .unwrap();
    let results = out.response.unwrap().results;

    assert_eq!(results[0].title, "Catan");
    assert_eq!(results[1].title, "Catan: Seafarers");
}

#[tokio::test]
async fn rating_preference_biases_quality_heavy_records_upward() {
    // Identical titles; only rating signals differ.
    let a = m_search(
        "prov-a",
        vec![
            rated_game("low", "prov-a", "Azul", 3.0, 100, 50_000),
            rated_game("high", "prov-a", "Azul", 4.8, 90_000, 50_000),
        ],
    );

    let shelf = Shelf::builder().with_connector(a).build().unwrap();

    let req = SearchRequest::builder("azul")
        .sort(SortBy::Rating)
        .build()
        .unwrap();
    let out = shelf.search(req).await.unwrap();
    let results = out.response.unwrap().results;

    assert_eq!(results[0].id, "high");
    assert_eq!(results[1].id, "low");
}
