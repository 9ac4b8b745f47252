use shelf::Shelf;
use shelf_core::SearchRequest;

use crate::helpers::{game, m_search, rated_game};

#[tokio::test]
async fn search_applies_limit_after_merge_and_ranking() {
    let a = m_search(
        "prov-a",
        vec![
            game("1", "prov-a", "Azul Mini"),
            rated_game("2", "prov-a", "Azul", 4.5, 50_000, 10),
        ],
    );
    let b = m_search("prov-b", vec![game("3", "prov-b", "Azul: Summer Pavilion")]);

    let shelf = Shelf::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let req = SearchRequest::builder("azul").limit(2).build().unwrap();
    let out = shelf.search(req).await.unwrap();
    let results = out.response.unwrap().results;

    assert_eq!(results.len(), 2, "limit caps the merged set");
    // The exact-match, highly rated record must survive the cut at the top.
    assert_eq!(results[0].id, "2");
}
