use shelf::Shelf;
use shelf_core::SearchRequest;

use crate::helpers::{game, m_search};

#[tokio::test]
async fn equal_ids_from_different_sources_are_never_merged() {
    // Both providers report id "13"; unrelated records that must both survive.
    let a = m_search("prov-a", vec![game("13", "prov-a", "Catan")]);
    let b = m_search("prov-b", vec![game("13", "prov-b", "Catan Dice Game")]);

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
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn duplicate_records_from_one_source_collapse() {
    let a = m_search(
        "prov-a",
        vec![
            game("13", "prov-a", "Catan"),
            game("13", "prov-a", "Catan"),
            game("14", "prov-a", "Catan: Seafarers"),
        ],
    );

    let shelf = Shelf::builder().with_connector(a).build().unwrap();

    let out = shelf
        .search(SearchRequest::builder("catan").build().unwrap())
        .await
        .unwrap();
    let results = out.response.unwrap().results;
    assert_eq!(results.len(), 2, "same (source, id) pair merges");
}
